//! Profile scenarios: unique index creation and enforcement

use crate::error::{ensure, ensure_eq, is_duplicate_key, ScenarioError, ScenarioResult};
use crate::models::{fixtures, Profile, PROFILES_COLLECTION};
use crate::queries;
use docsmoke_common::Connection;
use mongodb::Collection;
use tracing::{info, warn};

const UNIQUE_FIELD: &str = "user_id";

fn profiles(conn: &Connection) -> Collection<Profile> {
    conn.collection::<Profile>(PROFILES_COLLECTION)
}

pub(super) async fn indexing(conn: &Connection) -> ScenarioResult {
    let coll = profiles(conn);
    let model = queries::unique_ascending_index(UNIQUE_FIELD);
    let expected = queries::default_index_name(&model.keys);

    let created = coll.create_index(model, None).await?;
    ensure_eq(created.index_name.as_str(), expected.as_str(), "created index name")?;

    let names = coll.list_index_names().await?;
    ensure(
        names.iter().any(|name| *name == expected),
        format!("index '{}' not among {:?}", expected, names),
    )
}

pub(super) async fn unique_index(conn: &Connection) -> ScenarioResult {
    let coll = profiles(conn);

    let seed = fixtures::seed_profiles();
    let result = coll.insert_many(&seed, None).await?;
    ensure_eq(result.inserted_ids.len(), seed.len(), "seeded profile count")?;

    coll.insert_one(fixtures::extra_profile(), None).await?;
    Ok(())
}

pub(super) async fn duplicate_insert(conn: &Connection) -> ScenarioResult {
    let coll = profiles(conn);
    let duplicate = fixtures::duplicate_profile();

    match coll.insert_one(&duplicate, None).await {
        Ok(result) => {
            warn!("Duplicate user_id accepted as {}", result.inserted_id);
            return Err(ScenarioError::Assertion(format!(
                "insert of user_id {} should have raised a duplicate key error",
                duplicate.user_id
            )));
        }
        Err(e) if is_duplicate_key(&e) => {
            info!("Duplicate key rejected as expected: {}", e);
        }
        Err(e) => return Err(e.into()),
    }

    let holders = coll
        .count_documents(queries::by_user_id(duplicate.user_id), None)
        .await?;
    ensure_eq(holders, 1, "profiles holding the duplicated user_id")
}
