//! Post scenarios: insert, lookup, identifier typing, counts, range query
//!
//! Writes use the typed [`Post`]; reads decode to raw documents so that
//! posts with foreign field sets still count as found.

use crate::error::{ensure, ensure_eq, ScenarioError, ScenarioResult};
use crate::models::{author_of, fixtures, id_of, Post, POSTS_COLLECTION};
use crate::queries;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use chrono::{DateTime, Utc};
use docsmoke_common::{object_id, Connection};
use futures::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::Collection;
use std::collections::HashSet;
use tracing::info;

/// Total posts after post, object_id and bulk_inserts on an empty collection
const EXPECTED_TOTAL_POSTS: u64 = 4;
/// Posts by Mike after the same sequence
const EXPECTED_MIKE_POSTS: u64 = 2;

fn posts(conn: &Connection) -> Collection<Post> {
    conn.collection::<Post>(POSTS_COLLECTION)
}

fn raw_posts(conn: &Connection) -> Collection<Document> {
    conn.collection::<Document>(POSTS_COLLECTION)
}

/// Insert one post and return its identifier, failing unless it is an ObjectId
async fn insert_post(coll: &Collection<Post>, post: &Post) -> Result<ObjectId, ScenarioError> {
    let result = coll.insert_one(post, None).await?;
    object_id::from_bson(&result.inserted_id).ok_or_else(|| {
        ScenarioError::Assertion(format!(
            "inserted_id is not an ObjectId: {}",
            result.inserted_id
        ))
    })
}

/// The filtered lookup returned a post by `author`
fn check_author(found: Option<&Document>, author: &str) -> ScenarioResult {
    match found {
        Some(doc) => ensure_eq(author_of(doc), Some(author), "author"),
        None => Err(ScenarioError::Assertion(format!("no post by {}", author))),
    }
}

/// The lookup returned the document carrying `id`
fn check_found_id(found: Option<&Document>, id: ObjectId, how: &str) -> ScenarioResult {
    ensure(
        found.and_then(id_of) == Some(id),
        format!("lookup by {} did not return post {}", how, id),
    )
}

pub(super) async fn post(conn: &Connection) -> ScenarioResult {
    let id = insert_post(&posts(conn), &fixtures::first_post(Utc::now())).await?;
    info!("Inserted post {}", id);
    Ok(())
}

pub(super) async fn find_one(conn: &Connection) -> ScenarioResult {
    let found = raw_posts(conn).find_one(None, None).await?;
    ensure(found.is_some(), "find_one returned no document")
}

pub(super) async fn find_one_q(conn: &Connection) -> ScenarioResult {
    let coll = raw_posts(conn);

    let mike = coll.find_one(queries::by_author("Mike"), None).await?;
    check_author(mike.as_ref(), "Mike")?;

    let eliot = coll.find_one(queries::by_author("Eliot"), None).await?;
    ensure(
        eliot.is_none(),
        "found a post by Eliot before the bulk insert",
    )
}

pub(super) async fn object_id(conn: &Connection) -> ScenarioResult {
    let id = insert_post(&posts(conn), &fixtures::object_id_demo(Utc::now())).await?;
    let coll = raw_posts(conn);

    let by_id = coll.find_one(queries::by_id(id), None).await?;
    check_found_id(by_id.as_ref(), id, "ObjectId")?;

    let rendered = id.to_hex();
    let by_string = coll.find_one(queries::by_id_string(&rendered), None).await?;
    ensure(
        by_string.is_none(),
        format!("lookup by string \"{}\" matched an ObjectId", rendered),
    )?;

    let reparsed = object_id::parse(&rendered)?;
    let by_reparsed = coll.find_one(queries::by_id(reparsed), None).await?;
    check_found_id(by_reparsed.as_ref(), id, "re-parsed ObjectId")
}

pub(super) async fn bulk_inserts(conn: &Connection) -> ScenarioResult {
    let batch = fixtures::bulk_posts()
        .ok_or_else(|| ScenarioError::Assertion("invalid bulk post date".to_string()))?;
    let result = posts(conn).insert_many(&batch, None).await?;

    ensure_eq(result.inserted_ids.len(), batch.len(), "inserted id count")?;

    let distinct: HashSet<String> = result
        .inserted_ids
        .values()
        .map(|id| id.to_string())
        .collect();
    ensure_eq(distinct.len(), batch.len(), "distinct inserted ids")
}

pub(super) async fn count(conn: &Connection) -> ScenarioResult {
    let total = raw_posts(conn).count_documents(None, None).await?;
    ensure_eq(total, EXPECTED_TOTAL_POSTS, "posts count")
}

pub(super) async fn count_q(conn: &Connection) -> ScenarioResult {
    let mike = raw_posts(conn)
        .count_documents(queries::by_author("Mike"), None)
        .await?;
    ensure_eq(mike, EXPECTED_MIKE_POSTS, "posts by Mike")
}

/// Posts dated strictly before `cutoff`, ordered by author
pub async fn fetch_posts_before(
    conn: &Connection,
    cutoff: DateTime<Utc>,
) -> Result<Vec<Document>, ScenarioError> {
    let options = FindOptions::builder()
        .sort(queries::sort_ascending("author"))
        .build();
    let cursor = raw_posts(conn)
        .find(queries::dated_before(cutoff), options)
        .await?;
    let found: Vec<Document> = cursor.try_collect().await?;
    Ok(found)
}

pub(super) async fn range_query(conn: &Connection) -> ScenarioResult {
    let cutoff = fixtures::range_cutoff()
        .ok_or_else(|| ScenarioError::Assertion("invalid range cutoff".to_string()))?;

    let found = fetch_posts_before(conn, cutoff).await?;
    for doc in &found {
        let json: serde_json::Value = Bson::Document(doc.clone()).into_relaxed_extjson();
        info!("{}", json);
    }
    info!("{} post(s) dated before {}", found.len(), cutoff);
    Ok(())
}
