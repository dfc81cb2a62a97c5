use mongodb::{
    Collection, Database,
    bson::{doc, oid::ObjectId},
    error::{Error, ErrorKind},
    options::ReturnDocument,
};

use super::models::Album;
use crate::errors::AppError;
use crate::store::AlbumStore;

/// Server error code for `create` on a namespace that already exists.
const NAMESPACE_EXISTS: i32 = 48;

#[derive(Clone)]
pub struct MongoAlbumStore {
    db: Database,
    collection: Collection<Album>,
}

impl MongoAlbumStore {
    pub fn new(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Album>(collection_name);
        Self { db, collection }
    }

}

fn is_namespace_exists(err: &Error) -> bool {
    matches!(err.kind.as_ref(), ErrorKind::Command(cmd) if cmd.code == NAMESPACE_EXISTS)
}

impl AlbumStore for MongoAlbumStore {
    fn collection_name(&self) -> &str {
        self.collection.name()
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn ensure_collection(&self) -> Result<bool, AppError> {
        // `create` may succeed on an existing collection; 48 only covers a racing creator.
        let existing = self
            .db
            .list_collection_names()
            .filter(doc! { "name": self.collection.name() })
            .await?;
        if !existing.is_empty() {
            tracing::warn!(
                "Collection {}.{} already exists, continuing",
                self.db.name(),
                self.collection.name()
            );
            return Ok(false);
        }

        match self.db.create_collection(self.collection.name()).await {
            Ok(()) => Ok(true),
            Err(e) if is_namespace_exists(&e) => {
                tracing::warn!(
                    "Collection {}.{} already exists, continuing",
                    self.db.name(),
                    self.collection.name()
                );
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn insert(&self, album: Album) -> Result<Album, AppError> {
        let result = self.collection.insert_one(&album).await?;
        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "insert returned a non-ObjectId _id: {}",
                result.inserted_id
            ))
        })?;

        Ok(Album { id: Some(id), ..album })
    }

    async fn upsert_by_album_id(&self, album: Album) -> Result<Album, AppError> {
        let stored = self
            .collection
            .find_one_and_replace(doc! { "albumId": album.album_id }, &album)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?;

        stored.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "upsert of albumId {} returned no document",
                album.album_id
            ))
        })
    }

    async fn find_all(&self) -> Result<Vec<Album>, AppError> {
        let mut cursor = self.collection.find(doc! {}).await?;

        let mut albums = Vec::new();
        while cursor.advance().await? {
            albums.push(cursor.deserialize_current()?);
        }

        Ok(albums)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Album>, AppError> {
        let album = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(album)
    }

    async fn find_by_album_id(&self, album_id: i64) -> Result<Option<Album>, AppError> {
        let album = self
            .collection
            .find_one(doc! { "albumId": album_id })
            .await?;
        Ok(album)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn count(&self) -> Result<u64, AppError> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }
}
