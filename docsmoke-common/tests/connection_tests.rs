//! Integration tests for the connection handle against a live server
//!
//! These tests require a reachable MongoDB. Set DOCSMOKE_TEST_URI to a
//! connection string that selects a scratch database, e.g.
//! `mongodb://127.0.0.1:27017/docsmoke_test`. Without it they are skipped.

use bson::{doc, Document};
use docsmoke_common::Connection;
use serial_test::serial;

/// Test helper: open a connection to the test server, or None to skip
async fn setup_connection() -> Option<Connection> {
    let uri = match std::env::var("DOCSMOKE_TEST_URI") {
        Ok(uri) => uri,
        Err(_) => {
            eprintln!("Skipping test: DOCSMOKE_TEST_URI not set");
            return None;
        }
    };

    Some(
        Connection::open(&uri)
            .await
            .expect("Should open connection to test server"),
    )
}

#[tokio::test]
#[serial]
async fn test_ping_reaches_server() {
    let Some(conn) = setup_connection().await else {
        return;
    };

    conn.ping().await.expect("Ping should succeed");

    conn.close().await;
}

#[tokio::test]
#[serial]
async fn test_written_collection_is_listed() {
    let Some(conn) = setup_connection().await else {
        return;
    };

    let coll = conn.collection::<Document>("connection_check");
    coll.insert_one(doc! { "check": true }, None)
        .await
        .expect("Insert should succeed");

    let names = conn
        .list_collection_names()
        .await
        .expect("Should list collections");
    assert!(
        names.iter().any(|n| n == "connection_check"),
        "Expected connection_check in {:?}",
        names
    );

    // Cleanup
    coll.drop(None).await.expect("Drop should succeed");
    conn.close().await;
}

#[tokio::test]
#[serial]
async fn test_default_and_named_database_agree() {
    let Some(conn) = setup_connection().await else {
        return;
    };

    let name = conn.database().name().to_string();
    assert_eq!(conn.database_named(&name).name(), name);

    conn.close().await;
}
