//! One-shot population of the albums collection.
//!
//! Creates the collection, writes the three catalogue albums in order, then
//! looks up album 1 to confirm the write landed.

use std::str::FromStr;

use crate::db_mongo::models::Album;
use crate::errors::AppError;
use crate::store::AlbumStore;

/// Business key looked up after seeding.
pub const LOOKUP_ALBUM_ID: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// Append every album. Re-running duplicates the catalogue.
    #[default]
    Insert,
    /// Replace by `albumId`, so re-running converges on one copy.
    Upsert,
}

impl FromStr for SeedMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insert" => Ok(SeedMode::Insert),
            "upsert" => Ok(SeedMode::Upsert),
            other => Err(AppError::Config(format!(
                "unknown SEED_MODE '{other}', expected 'insert' or 'upsert'"
            ))),
        }
    }
}

#[derive(Debug)]
pub struct SeedReport {
    pub created_collection: bool,
    pub written: Vec<Album>,
    pub lookup: Option<Album>,
}

/// The catalogue written by every seed run, in insertion order.
pub fn seed_albums() -> Vec<Album> {
    vec![
        Album::new(
            "[Blue Train] featured by John Coltrane",
            "content body for Blue Train",
            1,
        ),
        Album::new(
            "[Jeru] featured by Gerry Mulligan",
            "content body for Jeru",
            2,
        ),
        Album::new(
            "[Sarah Vaughan and Clifford Brown] featured by Sarah Vaughan",
            "content body for Sarah Vaughan and Clifford Brown",
            3,
        ),
    ]
}

pub async fn run<S: AlbumStore>(store: &S, mode: SeedMode) -> Result<SeedReport, AppError> {
    let created_collection = store.ensure_collection().await?;
    if created_collection {
        tracing::info!("Created collection {}", store.collection_name());
    }

    let mut written = Vec::new();
    for album in seed_albums() {
        let album = match mode {
            SeedMode::Insert => store.insert(album).await?,
            SeedMode::Upsert => store.upsert_by_album_id(album).await?,
        };
        tracing::info!(
            "Wrote albumId={} to {} as {:?}: {}",
            album.album_id,
            store.collection_name(),
            album.id,
            album.name
        );
        written.push(album);
    }

    let lookup = store.find_by_album_id(LOOKUP_ALBUM_ID).await?;
    match &lookup {
        Some(album) => tracing::info!("Lookup albumId={}: {:?}", LOOKUP_ALBUM_ID, album),
        None => tracing::warn!("Lookup albumId={} found nothing", LOOKUP_ALBUM_ID),
    }

    Ok(SeedReport {
        created_collection,
        written,
        lookup,
    })
}
