//! Scenario error types and duplicate-key classification

use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// Server error code for a unique index violation
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// Why a scenario did not pass
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// A checked expectation did not hold
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// The driver signaled an error the scenario did not expect
    #[error("Driver error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// Connection or configuration failure before the scenario body ran
    #[error("Setup error: {0}")]
    Setup(#[from] docsmoke_common::Error),
}

/// Result of one scenario body
pub type ScenarioResult = std::result::Result<(), ScenarioError>;

/// Fail with `message` unless `condition` holds
pub fn ensure(condition: bool, message: impl Into<String>) -> ScenarioResult {
    if condition {
        Ok(())
    } else {
        Err(ScenarioError::Assertion(message.into()))
    }
}

/// Fail unless `actual == expected`
pub fn ensure_eq<T>(actual: T, expected: T, what: &str) -> ScenarioResult
where
    T: PartialEq + std::fmt::Debug,
{
    if actual == expected {
        Ok(())
    } else {
        Err(ScenarioError::Assertion(format!(
            "{}: expected {:?}, got {:?}",
            what, expected, actual
        )))
    }
}

/// Codes the server has used for duplicate keys (11001 and 12582 are legacy)
pub fn is_duplicate_key_code(code: i32) -> bool {
    matches!(code, 11000 | 11001 | 12582)
}

/// True when `err` is a unique-index violation from a single or bulk write
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            is_duplicate_key_code(write_error.code)
        }
        ErrorKind::BulkWrite(failure) => failure
            .write_errors
            .as_ref()
            .map_or(false, |errors| {
                errors.iter().any(|e| is_duplicate_key_code(e.code))
            }),
        ErrorKind::Command(command_error) => is_duplicate_key_code(command_error.code),
        _ => false,
    }
}
