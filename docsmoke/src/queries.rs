//! Filter, sort and index documents used by the scenarios

use bson::oid::ObjectId;
use bson::{doc, Bson, Document};
use chrono::{DateTime, Utc};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;

/// Sort or index direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    fn as_bson(self) -> Bson {
        match self {
            Direction::Ascending => Bson::Int32(1),
            Direction::Descending => Bson::Int32(-1),
        }
    }
}

/// `{author: <author>}`
pub fn by_author(author: &str) -> Document {
    doc! { "author": author }
}

/// `{_id: ObjectId(..)}`, the typed lookup
pub fn by_id(id: ObjectId) -> Document {
    doc! { "_id": id }
}

/// `{_id: "<hex>"}`, the string-typed lookup
///
/// Never matches a document whose `_id` is an ObjectId.
pub fn by_id_string(id: &str) -> Document {
    doc! { "_id": id }
}

/// `{user_id: <user_id>}`
pub fn by_user_id(user_id: i32) -> Document {
    doc! { "user_id": user_id }
}

/// `{date: {$lt: <cutoff>}}`
pub fn dated_before(cutoff: DateTime<Utc>) -> Document {
    doc! { "date": { "$lt": bson::DateTime::from_chrono(cutoff) } }
}

/// Single-key sort specification
pub fn sort_by(field: &str, direction: Direction) -> Document {
    let mut sort = Document::new();
    sort.insert(field, direction.as_bson());
    sort
}

/// `{<field>: 1}`
pub fn sort_ascending(field: &str) -> Document {
    sort_by(field, Direction::Ascending)
}

/// Ascending single-field index with a uniqueness constraint
pub fn unique_ascending_index(field: &str) -> IndexModel {
    IndexModel::builder()
        .keys(sort_ascending(field))
        .options(IndexOptions::builder().unique(true).build())
        .build()
}

/// Name the server assigns an index created without an explicit name
///
/// Each key contributes `<field>_<direction>`, joined with `_`:
/// `{user_id: 1}` becomes `user_id_1`.
pub fn default_index_name(keys: &Document) -> String {
    keys.iter()
        .map(|(field, value)| format!("{}_{}", field, render_index_value(value)))
        .collect::<Vec<_>>()
        .join("_")
}

fn render_index_value(value: &Bson) -> String {
    match value {
        Bson::Int32(n) => n.to_string(),
        Bson::Int64(n) => n.to_string(),
        Bson::Double(n) if n.fract() == 0.0 => format!("{}", *n as i64),
        Bson::Double(n) => n.to_string(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}
