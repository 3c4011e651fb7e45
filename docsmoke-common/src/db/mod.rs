//! Database access

pub mod connection;

pub use connection::Connection;
