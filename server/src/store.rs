use std::future::Future;

use mongodb::bson::oid::ObjectId;

use crate::db_mongo::models::Album;
use crate::errors::AppError;

/// Persistence operations over the albums collection.
///
/// Handles are cheap to clone and shared across tasks.
pub trait AlbumStore: Clone + Send + Sync + 'static {
    /// Name of the backing collection, for logs.
    fn collection_name(&self) -> &str;

    /// Cheap reachability check that does not touch the documents.
    fn ping(&self) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Creates the collection. Returns `false` when it already existed.
    fn ensure_collection(&self) -> impl Future<Output = Result<bool, AppError>> + Send;

    fn insert(&self, album: Album) -> impl Future<Output = Result<Album, AppError>> + Send;

    /// Replaces the first album with the same `albumId`, inserting when none matches.
    fn upsert_by_album_id(&self, album: Album)
    -> impl Future<Output = Result<Album, AppError>> + Send;

    fn find_all(&self) -> impl Future<Output = Result<Vec<Album>, AppError>> + Send;

    fn find_by_id(&self, id: ObjectId)
    -> impl Future<Output = Result<Option<Album>, AppError>> + Send;

    /// First album whose `albumId` matches.
    fn find_by_album_id(&self, album_id: i64)
    -> impl Future<Output = Result<Option<Album>, AppError>> + Send;

    fn delete(&self, id: ObjectId) -> impl Future<Output = Result<bool, AppError>> + Send;

    fn count(&self) -> impl Future<Output = Result<u64, AppError>> + Send;
}

#[cfg(test)]
pub use memory::InMemoryAlbumStore;
