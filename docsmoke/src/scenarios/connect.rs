//! Reachability scenarios: client, database, collection

use crate::error::{ensure, ensure_eq, ScenarioResult};
use crate::models::{INFO_COLLECTION, POSTS_COLLECTION};
use bson::Document;
use docsmoke_common::{Connection, Settings};
use tracing::info;

pub(super) async fn conn(conn: &Connection) -> ScenarioResult {
    let names = conn.list_collection_names().await?;
    info!(
        "Collections in '{}': {:?}",
        conn.database().name(),
        names
    );
    Ok(())
}

pub(super) async fn db(conn: &Connection, settings: &Settings) -> ScenarioResult {
    ensure_eq(
        conn.database().name(),
        settings.database.as_str(),
        "default database name",
    )?;
    ensure_eq(
        conn.database_named(&settings.database).name(),
        settings.database.as_str(),
        "named database name",
    )
}

pub(super) async fn collection(conn: &Connection, settings: &Settings) -> ScenarioResult {
    let by_default = conn.collection::<Document>(INFO_COLLECTION);
    ensure_eq(by_default.name(), INFO_COLLECTION, "collection name")?;

    let by_name = conn
        .database_named(&settings.database)
        .collection::<Document>(INFO_COLLECTION);
    ensure_eq(by_name.name(), INFO_COLLECTION, "collection name via named database")?;
    ensure_eq(
        by_name.namespace().db.as_str(),
        settings.database.as_str(),
        "collection namespace",
    )
}

pub(super) async fn new_collection(conn: &Connection) -> ScenarioResult {
    let names = conn.list_collection_names().await?;
    ensure(
        names.iter().any(|name| name == POSTS_COLLECTION),
        format!("'{}' not among {:?}", POSTS_COLLECTION, names),
    )
}
