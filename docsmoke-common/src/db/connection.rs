//! Connection handle
//!
//! One [`Connection`] wraps one driver client plus the default database the
//! connection string selects. The handle is opened at scenario setup and
//! released with [`Connection::close`] at teardown.

use crate::{Error, Result};
use bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use tracing::{debug, info};

/// Open session to the configured endpoint
#[derive(Debug, Clone)]
pub struct Connection {
    client: Client,
    database: Database,
}

impl Connection {
    /// Open a client for `uri`, used verbatim
    ///
    /// The connection string must name a default database
    /// (`mongodb://host/<db>`); otherwise this returns [`Error::Config`].
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first operation rather than here.
    pub async fn open(uri: &str) -> Result<Self> {
        let options = ClientOptions::parse(uri).await?;

        let default_db = options.default_database.clone().ok_or_else(|| {
            Error::Config("connection string does not select a default database".to_string())
        })?;

        let client = Client::with_options(options)?;
        let database = client.database(&default_db);

        info!("Opened client for database '{}'", default_db);

        Ok(Self { client, database })
    }

    /// Round-trip a `ping` command to verify the server is reachable
    pub async fn ping(&self) -> Result<()> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        debug!("Ping to '{}' succeeded", self.database.name());
        Ok(())
    }

    /// The default database selected by the connection string
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// A database looked up by explicit name
    pub fn database_named(&self, name: &str) -> Database {
        self.client.database(name)
    }

    /// A typed collection in the default database
    pub fn collection<T>(&self, name: &str) -> Collection<T> {
        self.database.collection::<T>(name)
    }

    /// Names of every collection in the default database
    pub async fn list_collection_names(&self) -> Result<Vec<String>> {
        let names = self.database.list_collection_names(None).await?;
        Ok(names)
    }

    /// Release the handle
    ///
    /// Waits for in-flight operations and closes pooled connections.
    pub async fn close(self) {
        let Self { client, database } = self;
        let name = database.name().to_string();
        drop(database);
        client.shutdown().await;
        debug!("Closed client for database '{}'", name);
    }
}
