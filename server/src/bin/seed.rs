//! Seed the albums collection with the three catalogue albums.
//!
//! Run with:
//! ```
//! cargo run -p albums --bin seed
//! ```
//!
//! Connection settings come from the environment (see `.env.example`).
//! `SEED_MODE=upsert` makes re-runs converge instead of duplicating.

use anyhow::{Context, Result};

use albums::{
    config::{Config, redact_uri},
    db_mongo::{self, MongoAlbumStore},
    seeder,
    store::AlbumStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    albums::init_tracing();

    let config = Config::from_env()?;
    tracing::info!("Connecting to {}", redact_uri(&config.mongodb.uri));

    let client = db_mongo::create_client(&config.mongodb.uri).await?;
    let db = db_mongo::get_database(&client, &config.mongodb.database);
    let store = MongoAlbumStore::new(db, &config.mongodb.collection);

    let report = seeder::run(&store, config.seed_mode)
        .await
        .with_context(|| {
            format!(
                "Failed to seed {}.{}",
                config.mongodb.database,
                store.collection_name()
            )
        })?;

    tracing::info!("Seed completed!");
    tracing::info!("  Mode: {:?}", config.seed_mode);
    tracing::info!("  Collection created: {}", report.created_collection);
    tracing::info!("  Albums written: {}", report.written.len());
    if let Some(album) = &report.lookup {
        tracing::info!("  albumId={} -> {}", seeder::LOOKUP_ALBUM_ID, album.name);
    }

    Ok(())
}
