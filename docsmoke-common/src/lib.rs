//! # docsmoke Common Library
//!
//! Shared code for the docsmoke harness:
//! - Connection handle for the document database
//! - Settings resolution (CLI, environment, TOML, defaults)
//! - ObjectId helpers
//! - Error types

pub mod config;
pub mod db;
pub mod error;
pub mod object_id;

pub use config::Settings;
pub use db::Connection;
pub use error::{Error, Result};
