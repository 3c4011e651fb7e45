//! Error type shared by the harness crates

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The driver rejected the connection string or an operation failed
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Config file unreadable or malformed, or settings unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Value supplied by the caller could not be interpreted
    /// (malformed ObjectId hex, unknown scenario name)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
