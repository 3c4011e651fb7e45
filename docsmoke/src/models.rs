//! Documents written and read by the scenarios
//!
//! Documents are schemaless on the server. Optional fields are skipped when
//! absent so that posts with different field sets stay different on disk.

use bson::oid::ObjectId;
use bson::Document;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Collection used only to check reachability
pub const INFO_COLLECTION: &str = "info";
/// Blog posts
pub const POSTS_COLLECTION: &str = "posts";
/// User profiles, unique on `user_id`
pub const PROFILES_COLLECTION: &str = "profiles";

/// A blog post, as the scenarios write it
///
/// Reads go through raw [`Document`]s: other writers may leave posts with
/// any field set, and those must not fail a lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
}

impl Post {
    pub fn new(author: &str, text: &str, date: DateTime<Utc>) -> Self {
        Self {
            id: None,
            author: author.to_string(),
            title: None,
            text: text.to_string(),
            tags: Vec::new(),
            date,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }
}

/// A user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: i32,
    pub name: String,
}

impl Profile {
    pub fn new(user_id: i32, name: &str) -> Self {
        Self {
            id: None,
            user_id,
            name: name.to_string(),
        }
    }
}

/// `author` of a raw post document, if present and a string
pub fn author_of(doc: &Document) -> Option<&str> {
    doc.get_str("author").ok()
}

/// `_id` of a raw document, if it is an ObjectId
pub fn id_of(doc: &Document) -> Option<ObjectId> {
    doc.get_object_id("_id").ok()
}

/// Naive wall-clock time interpreted as UTC, the way the server stores it
///
/// Returns `None` for an impossible date.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).single()
}

/// Fixed documents used by the scenarios
pub mod fixtures {
    use super::*;

    /// First post by Mike, dated at insert time
    pub fn first_post(now: DateTime<Utc>) -> Post {
        Post::new("Mike", "My first blog post!", now).with_tags(&["mongodb", "rust", "driver"])
    }

    /// Post whose generated identifier is looked up three ways
    pub fn object_id_demo(now: DateTime<Utc>) -> Post {
        Post::new("Jake", "ObjectId demo!", now).with_tags(&["mongodb", "rust", "driver"])
    }

    /// Two posts with different field sets, inserted in one call
    ///
    /// `None` if either date is impossible; never a shorter batch.
    pub fn bulk_posts() -> Option<Vec<Post>> {
        Some(vec![
            Post::new("Mike", "Another post!", utc(2009, 11, 12, 11, 14)?)
                .with_tags(&["bulk", "insert"]),
            Post::new("Eliot", "and pretty easy too!", utc(2009, 11, 10, 10, 45)?)
                .with_title("MongoDB is fun"),
        ])
    }

    /// Upper bound (exclusive) of the range query
    pub fn range_cutoff() -> Option<DateTime<Utc>> {
        utc(2009, 11, 12, 12, 0)
    }

    /// Profiles inserted in bulk before the single insert
    pub fn seed_profiles() -> Vec<Profile> {
        vec![Profile::new(211, "Luke"), Profile::new(212, "Ziltoid")]
    }

    /// Profile inserted on its own after the seed
    pub fn extra_profile() -> Profile {
        Profile::new(213, "Drew")
    }

    /// Profile reusing user_id 212
    pub fn duplicate_profile() -> Profile {
        Profile::new(212, "Tommy")
    }
}
