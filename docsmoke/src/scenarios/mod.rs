//! Smoke scenarios
//!
//! Each scenario is an independent check against the live server, run with
//! its own connection. Scenarios share nothing but server state, so later
//! scenarios (the counts in particular) depend on documents written by
//! earlier ones. [`Scenario::ALL`] is the order that makes those counts hold.

mod connect;
mod posts;
mod profiles;

pub use posts::fetch_posts_before;

use crate::error::ScenarioResult;
use docsmoke_common::{Connection, Error, Settings};
use std::fmt;
use std::str::FromStr;

/// One named smoke check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    Conn,
    Db,
    Collection,
    Post,
    NewCollection,
    FindOne,
    FindOneQ,
    ObjectId,
    BulkInserts,
    Count,
    CountQ,
    RangeQuery,
    Indexing,
    UniqueIndex,
    DuplicateInsert,
}

impl Scenario {
    /// Every scenario in execution order
    pub const ALL: [Scenario; 15] = [
        Scenario::Conn,
        Scenario::Db,
        Scenario::Collection,
        Scenario::Post,
        Scenario::NewCollection,
        Scenario::FindOne,
        Scenario::FindOneQ,
        Scenario::ObjectId,
        Scenario::BulkInserts,
        Scenario::Count,
        Scenario::CountQ,
        Scenario::RangeQuery,
        Scenario::Indexing,
        Scenario::UniqueIndex,
        Scenario::DuplicateInsert,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Conn => "conn",
            Scenario::Db => "db",
            Scenario::Collection => "collection",
            Scenario::Post => "post",
            Scenario::NewCollection => "new_collection",
            Scenario::FindOne => "find_one",
            Scenario::FindOneQ => "find_one_q",
            Scenario::ObjectId => "object_id",
            Scenario::BulkInserts => "bulk_inserts",
            Scenario::Count => "count",
            Scenario::CountQ => "count_q",
            Scenario::RangeQuery => "range_query",
            Scenario::Indexing => "indexing",
            Scenario::UniqueIndex => "unique_index",
            Scenario::DuplicateInsert => "duplicate_insert",
        }
    }

    /// One-line description for `--list`
    pub fn description(self) -> &'static str {
        match self {
            Scenario::Conn => "open a client and list collection names",
            Scenario::Db => "default and explicitly named database agree",
            Scenario::Collection => "collection reachable by default and explicit database",
            Scenario::Post => "insert one post, identifier is an ObjectId",
            Scenario::NewCollection => "posts collection now exists",
            Scenario::FindOne => "unfiltered find_one returns a post",
            Scenario::FindOneQ => "find_one by author matches, unknown author absent",
            Scenario::ObjectId => "lookup by ObjectId, by hex string, by re-parsed ObjectId",
            Scenario::BulkInserts => "insert_many returns one identifier per post",
            Scenario::Count => "posts holds exactly 4 documents",
            Scenario::CountQ => "exactly 2 posts by Mike",
            Scenario::RangeQuery => "posts before 2009-11-12 12:00 sorted by author",
            Scenario::Indexing => "unique ascending index on profiles.user_id",
            Scenario::UniqueIndex => "insert profiles 211, 212, 213",
            Scenario::DuplicateInsert => "second user_id 212 signals duplicate key",
        }
    }

    /// Position in [`Scenario::ALL`]
    pub fn ordinal(self) -> usize {
        Scenario::ALL
            .iter()
            .position(|s| *s == self)
            .unwrap_or(Scenario::ALL.len())
    }

    /// Run the scenario body against an open connection
    pub async fn run(self, conn: &Connection, settings: &Settings) -> ScenarioResult {
        match self {
            Scenario::Conn => connect::conn(conn).await,
            Scenario::Db => connect::db(conn, settings).await,
            Scenario::Collection => connect::collection(conn, settings).await,
            Scenario::Post => posts::post(conn).await,
            Scenario::NewCollection => connect::new_collection(conn).await,
            Scenario::FindOne => posts::find_one(conn).await,
            Scenario::FindOneQ => posts::find_one_q(conn).await,
            Scenario::ObjectId => posts::object_id(conn).await,
            Scenario::BulkInserts => posts::bulk_inserts(conn).await,
            Scenario::Count => posts::count(conn).await,
            Scenario::CountQ => posts::count_q(conn).await,
            Scenario::RangeQuery => posts::range_query(conn).await,
            Scenario::Indexing => profiles::indexing(conn).await,
            Scenario::UniqueIndex => profiles::unique_index(conn).await,
            Scenario::DuplicateInsert => profiles::duplicate_insert(conn).await,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        Scenario::ALL
            .iter()
            .copied()
            .find(|scenario| scenario.name() == wanted)
            .ok_or_else(|| Error::InvalidInput(format!("unknown scenario: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_round_trip() {
        for scenario in Scenario::ALL {
            assert_eq!(scenario.name().parse::<Scenario>().unwrap(), scenario);
        }
    }

    #[test]
    fn test_names_unique() {
        let names: HashSet<_> = Scenario::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), Scenario::ALL.len());
    }

    #[test]
    fn test_parse_accepts_dashes() {
        assert_eq!(
            "duplicate-insert".parse::<Scenario>().unwrap(),
            Scenario::DuplicateInsert
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(matches!(
            "drop_everything".parse::<Scenario>(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_writers_precede_counts() {
        // Counts rely on post, object_id and bulk_inserts having run first
        let count = Scenario::Count.ordinal();
        assert!(Scenario::Post.ordinal() < count);
        assert!(Scenario::ObjectId.ordinal() < count);
        assert!(Scenario::BulkInserts.ordinal() < count);
        assert!(Scenario::CountQ.ordinal() > Scenario::BulkInserts.ordinal());
    }

    #[test]
    fn test_eliot_absent_check_precedes_bulk_insert() {
        assert!(Scenario::FindOneQ.ordinal() < Scenario::BulkInserts.ordinal());
    }

    #[test]
    fn test_index_precedes_profile_inserts() {
        assert!(Scenario::Indexing.ordinal() < Scenario::UniqueIndex.ordinal());
        assert!(Scenario::UniqueIndex.ordinal() < Scenario::DuplicateInsert.ordinal());
    }
}
