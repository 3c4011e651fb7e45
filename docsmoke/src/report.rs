//! Per-scenario outcomes and the suite summary

use crate::scenarios::Scenario;
use std::time::Duration;

/// Outcome of one scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed(String),
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }
}

/// One scenario's result
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub scenario: Scenario,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

/// Results of a suite run, in execution order
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub results: Vec<ScenarioReport>,
}

impl SuiteReport {
    pub fn push(&mut self, report: ScenarioReport) {
        self.results.push(report);
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    /// True when every scenario that ran passed
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Failed scenarios with their messages
    pub fn failures(&self) -> impl Iterator<Item = (Scenario, &str)> + '_ {
        self.results.iter().filter_map(|r| match &r.outcome {
            Outcome::Failed(msg) => Some((r.scenario, msg.as_str())),
            Outcome::Passed => None,
        })
    }

    pub fn outcome_of(&self, scenario: Scenario) -> Option<&Outcome> {
        self.results
            .iter()
            .find(|r| r.scenario == scenario)
            .map(|r| &r.outcome)
    }

    /// `"13 passed, 2 failed in 0.84s"`
    pub fn summary(&self) -> String {
        let total: Duration = self.results.iter().map(|r| r.elapsed).sum();
        format!(
            "{} passed, {} failed in {:.2}s",
            self.passed(),
            self.failed(),
            total.as_secs_f64()
        )
    }
}
