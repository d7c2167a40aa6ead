//! MongoDB-backed database client.

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use crate::config::Settings;
use crate::db::DbClient;
use crate::error::Result;

/// Thin wrapper around the MongoDB driver client.
#[derive(Debug, Clone)]
pub struct MongoClient {
    client: Client,
}

impl MongoClient {
    /// Build a client from the configured URL and pool bounds.
    ///
    /// The driver connects lazily; reachability is verified by the liveness
    /// probe during lifecycle startup, not here.
    pub async fn connect(settings: &Settings) -> Result<Self> {
        let mut options = ClientOptions::parse(&settings.mongodb_url).await?;
        options.min_pool_size = Some(settings.mongodb_min_pool_size);
        options.max_pool_size = Some(settings.mongodb_max_pool_size);
        options.app_name = Some(settings.app_name.clone());

        let client = Client::with_options(options)?;
        Ok(Self { client })
    }
}

impl DbClient for MongoClient {
    type Db = Database;

    async fn ping(&self) -> Result<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    fn database(&self, name: &str) -> Database {
        self.client.database(name)
    }

    async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_builds_client_without_reaching_server() {
        // Construction only parses the URL and configures the pool; the
        // server is first contacted by the liveness probe.
        let settings = Settings {
            mongodb_url: "mongodb://localhost:1".to_string(),
            ..Settings::default()
        };

        let client = MongoClient::connect(&settings).await;
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn connect_rejects_malformed_url() {
        let settings = Settings {
            mongodb_url: "mongodb://".to_string(),
            ..Settings::default()
        };

        let client = MongoClient::connect(&settings).await;
        assert!(client.is_err());
    }
}
