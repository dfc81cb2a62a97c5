use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::{AppState, db_mongo::models::Album, errors::AppError, store::AlbumStore};

/// OpenAPI document for the album routes, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(title = "Albums API", description = "Albums stored in MongoDB"),
    servers((url = "/api/v1")),
    paths(
        list_albums,
        get_album,
        get_album_by_album_id,
        create_album,
        delete_album
    ),
    components(schemas(CreateAlbum, AlbumResponse, ErrorMessage)),
    tags((name = "albums", description = "Album catalogue"))
)]
pub struct ApiDoc;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAlbum {
    pub name: String,
    pub content: String,
    #[serde(rename = "albumId")]
    #[schema(minimum = 1)]
    pub album_id: i64,
}

impl CreateAlbum {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::InvalidInput("name is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(AppError::InvalidInput("content is required".to_string()));
        }
        if self.album_id < 1 {
            return Err(AppError::InvalidInput("albumId must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct AlbumResponse {
    /// Hex ObjectId.
    pub id: String,
    pub name: String,
    pub content: String,
    #[serde(rename = "albumId")]
    pub album_id: i64,
}

impl From<Album> for AlbumResponse {
    fn from(album: Album) -> Self {
        Self {
            id: album.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: album.name,
            content: album.content,
            album_id: album.album_id,
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorMessage {
    pub message: String,
}

fn parse_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::InvalidId(raw.to_string()))
}

pub async fn index() -> &'static str {
    "Hello world!"
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Get albums list.
#[utoipa::path(
    get,
    path = "/albums",
    tag = "albums",
    responses(
        (status = 200, description = "All albums in insertion order", body = Vec<AlbumResponse>)
    )
)]
pub async fn list_albums<S: AlbumStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<AlbumResponse>>, AppError> {
    let albums = state.store.find_all().await?;
    Ok(Json(albums.into_iter().map(AlbumResponse::from).collect()))
}

/// Get album by id.
#[utoipa::path(
    get,
    path = "/albums/{id}",
    tag = "albums",
    params(("id" = String, Path, description = "Album ObjectId (hex)")),
    responses(
        (status = 200, description = "Album found", body = AlbumResponse),
        (status = 400, description = "Malformed id", body = ErrorMessage),
        (status = 404, description = "Album not found", body = ErrorMessage)
    )
)]
pub async fn get_album<S: AlbumStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<AlbumResponse>, AppError> {
    let id = parse_id(&id)?;
    let album = state.store.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(album.into()))
}

/// Get the first album with the given business key.
#[utoipa::path(
    get,
    path = "/albums/by-album-id/{album_id}",
    tag = "albums",
    params(("album_id" = i64, Path, description = "Business key (albumId)")),
    responses(
        (status = 200, description = "Album found", body = AlbumResponse),
        (status = 400, description = "albumId is not an integer", body = ErrorMessage),
        (status = 404, description = "Album not found", body = ErrorMessage)
    )
)]
pub async fn get_album_by_album_id<S: AlbumStore>(
    State(state): State<AppState<S>>,
    album_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<AlbumResponse>, AppError> {
    let Path(album_id) = album_id.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let album = state
        .store
        .find_by_album_id(album_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(album.into()))
}

/// Create new album.
#[utoipa::path(
    post,
    path = "/albums",
    tag = "albums",
    request_body = CreateAlbum,
    responses(
        (status = 201, description = "Album created", body = AlbumResponse),
        (status = 400, description = "Invalid album data", body = ErrorMessage)
    )
)]
pub async fn create_album<S: AlbumStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CreateAlbum>, JsonRejection>,
) -> Result<(StatusCode, Json<AlbumResponse>), AppError> {
    let Json(request) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    request.validate()?;

    let album = state
        .store
        .insert(Album::new(request.name, request.content, request.album_id))
        .await?;
    tracing::info!("Created album {:?} (albumId={})", album.id, album.album_id);

    Ok((StatusCode::CREATED, Json(album.into())))
}

/// Delete album by id.
#[utoipa::path(
    delete,
    path = "/albums/{id}",
    tag = "albums",
    params(("id" = String, Path, description = "Album ObjectId (hex)")),
    responses(
        (status = 202, description = "Album deleted"),
        (status = 400, description = "Malformed id", body = ErrorMessage),
        (status = 404, description = "Album not found", body = ErrorMessage)
    )
)]
pub async fn delete_album<S: AlbumStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!("Deleted album {}", id);
    Ok(StatusCode::ACCEPTED)
}
