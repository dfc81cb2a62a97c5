use anyhow::{Context, Result};
use tokio::net::TcpListener;

use albums::{
    config::{Config, redact_uri},
    db_mongo::{self, MongoAlbumStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    albums::init_tracing();

    let config = Config::from_env()?;
    tracing::info!("Connecting to {}", redact_uri(&config.mongodb.uri));

    let client = db_mongo::create_client(&config.mongodb.uri).await?;
    let db = db_mongo::get_database(&client, &config.mongodb.database);
    let store = MongoAlbumStore::new(db, &config.mongodb.collection);

    let app = albums::router(store);

    let listener = TcpListener::bind(config.server_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server_addr))?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
