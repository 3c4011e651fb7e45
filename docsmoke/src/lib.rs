//! docsmoke library - document-database smoke suite
//!
//! Black-box checks that the MongoDB driver and server behave as documented
//! for inserts, lookups, identifier typing, counts, range queries and unique
//! indexes. All database behavior is the driver's and the server's; this
//! crate only sequences operations and checks their results.

pub mod error;
pub mod models;
pub mod queries;
pub mod report;
pub mod scenarios;
pub mod suite;

pub use error::{is_duplicate_key, ScenarioError, ScenarioResult};
pub use report::{Outcome, ScenarioReport, SuiteReport};
pub use scenarios::Scenario;
pub use suite::SmokeSuite;
