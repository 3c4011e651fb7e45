//! Sequential suite runner
//!
//! Scenarios run one at a time in [`Scenario::ALL`] order. Each gets a fresh
//! connection that is closed when the scenario finishes, pass or fail.

use crate::error::ScenarioError;
use crate::models::{POSTS_COLLECTION, PROFILES_COLLECTION};
use crate::report::{Outcome, ScenarioReport, SuiteReport};
use crate::scenarios::Scenario;
use bson::Document;
use docsmoke_common::config::redact_uri;
use docsmoke_common::{Connection, Settings};
use std::time::Instant;
use tracing::{error, info, warn};

/// Collections the scenarios write to
pub const SCENARIO_COLLECTIONS: [&str; 2] = [POSTS_COLLECTION, PROFILES_COLLECTION];

/// Smoke suite bound to one set of settings
#[derive(Debug, Clone)]
pub struct SmokeSuite {
    settings: Settings,
}

impl SmokeSuite {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Drop every collection the scenarios write to
    ///
    /// Dropping a collection that does not exist is not an error.
    pub async fn reset(&self) -> Result<(), ScenarioError> {
        let conn = Connection::open(&self.settings.mongo_uri).await?;
        let result = drop_scenario_collections(&conn).await;
        conn.close().await;
        result
    }

    /// Run `selection` in declared order; an empty selection runs everything
    ///
    /// Fails only when the reset requested by the settings fails. Scenario
    /// failures are recorded in the report.
    pub async fn run(&self, selection: &[Scenario]) -> Result<SuiteReport, ScenarioError> {
        info!(
            "Running smoke suite against {}",
            redact_uri(&self.settings.mongo_uri)
        );

        if self.settings.reset_collections {
            self.reset().await?;
        }

        let mut report = SuiteReport::default();
        for scenario in ordered_selection(selection) {
            report.push(self.run_scenario(scenario).await);
        }

        if report.all_passed() {
            info!("Smoke suite finished: {}", report.summary());
        } else {
            warn!("Smoke suite finished: {}", report.summary());
        }

        Ok(report)
    }

    /// Open a connection, run one scenario, close the connection
    pub async fn run_scenario(&self, scenario: Scenario) -> ScenarioReport {
        let started = Instant::now();

        let result = match Connection::open(&self.settings.mongo_uri).await {
            Ok(conn) => {
                let result = scenario.run(&conn, &self.settings).await;
                conn.close().await;
                result
            }
            Err(e) => Err(ScenarioError::Setup(e)),
        };

        let elapsed = started.elapsed();
        let outcome = match result {
            Ok(()) => {
                info!("✓ {} ({} ms)", scenario, elapsed.as_millis());
                Outcome::Passed
            }
            Err(e) => {
                error!("✗ {}: {}", scenario, e);
                Outcome::Failed(e.to_string())
            }
        };

        ScenarioReport {
            scenario,
            outcome,
            elapsed,
        }
    }
}

async fn drop_scenario_collections(conn: &Connection) -> Result<(), ScenarioError> {
    for name in SCENARIO_COLLECTIONS {
        conn.collection::<Document>(name).drop(None).await?;
        info!("Dropped collection '{}'", name);
    }
    Ok(())
}

/// Selected scenarios in [`Scenario::ALL`] order, without duplicates
pub fn ordered_selection(selection: &[Scenario]) -> Vec<Scenario> {
    if selection.is_empty() {
        return Scenario::ALL.to_vec();
    }
    Scenario::ALL
        .iter()
        .copied()
        .filter(|scenario| selection.contains(scenario))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_runs_everything() {
        assert_eq!(ordered_selection(&[]), Scenario::ALL.to_vec());
    }

    #[test]
    fn test_selection_follows_declared_order() {
        let selection = [Scenario::CountQ, Scenario::Post, Scenario::Count];
        assert_eq!(
            ordered_selection(&selection),
            vec![Scenario::Post, Scenario::Count, Scenario::CountQ]
        );
    }

    #[test]
    fn test_selection_drops_duplicates() {
        let selection = [Scenario::Db, Scenario::Db];
        assert_eq!(ordered_selection(&selection), vec![Scenario::Db]);
    }

    #[tokio::test]
    async fn test_setup_failure_is_reported() {
        // No default database in the URI: fails before any network I/O
        let suite = SmokeSuite::new(Settings::with_uri("mongodb://127.0.0.1:27017"));

        let report = suite.run_scenario(Scenario::Db).await;

        match report.outcome {
            Outcome::Failed(msg) => assert!(msg.starts_with("Setup error"), "{}", msg),
            Outcome::Passed => panic!("Scenario should fail without a default database"),
        }
    }

    #[tokio::test]
    async fn test_db_scenario_needs_no_server() {
        // Name checks only inspect client-side handles
        let suite = SmokeSuite::new(Settings::with_uri("mongodb://127.0.0.1:27017/h6"));

        let report = suite.run_scenario(Scenario::Db).await;

        assert_eq!(report.outcome, Outcome::Passed);
    }

    #[tokio::test]
    async fn test_db_scenario_detects_wrong_database() {
        let suite = SmokeSuite::new(Settings::with_uri("mongodb://127.0.0.1:27017/blog"));

        let report = suite.run_scenario(Scenario::Db).await;

        match report.outcome {
            Outcome::Failed(msg) => assert!(msg.contains("default database name"), "{}", msg),
            Outcome::Passed => panic!("Expected name mismatch against h6"),
        }
    }
}
