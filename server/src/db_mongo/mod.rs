pub mod models;
pub mod queries;

use anyhow::{Context, Result};
use mongodb::{Client, Database, bson::doc, options::ClientOptions};

pub use queries::MongoAlbumStore;

const APP_NAME: &str = "albums";

/// Connect and verify the credentials with a `ping` against `admin`.
///
/// The returned client is the single connection handle for the process;
/// callers pass it (or handles derived from it) explicitly.
pub async fn create_client(uri: &str) -> Result<Client> {
    let mut options = ClientOptions::parse(uri)
        .await
        .context("Invalid MongoDB connection string")?;
    options.app_name = Some(APP_NAME.to_string());

    let hosts: Vec<String> = options.hosts.iter().map(|h| h.to_string()).collect();
    let client = Client::with_options(options).context("Failed to build MongoDB client")?;

    client
        .database("admin")
        .run_command(doc! {"ping": 1})
        .await
        .with_context(|| format!("Failed to ping MongoDB at {}", hosts.join(",")))?;

    tracing::info!("Successfully connected to MongoDB ({})", hosts.join(","));
    Ok(client)
}

/// Database handle. The server creates the database lazily on first write.
pub fn get_database(client: &Client, db_name: &str) -> Database {
    client.database(db_name)
}
