pub mod albums;
pub mod config;
pub mod db_mongo;
pub mod errors;
pub mod health;
pub mod seeder;
pub mod store;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::store::AlbumStore;

#[derive(Clone)]
pub struct AppState<S> {
    pub store: S,
}

/// Install the fmt subscriber, honouring `RUST_LOG` and defaulting to `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

pub fn router<S: AlbumStore>(store: S) -> Router {
    let api = Router::new()
        .route(
            "/albums",
            get(albums::list_albums::<S>).post(albums::create_album::<S>),
        )
        .route(
            "/albums/{id}",
            get(albums::get_album::<S>).delete(albums::delete_album::<S>),
        )
        .route(
            "/albums/by-album-id/{album_id}",
            get(albums::get_album_by_album_id::<S>),
        );

    Router::new()
        .route("/", get(albums::index))
        .route("/health", get(health::health_check::<S>))
        .route("/api-docs/openapi.json", get(albums::openapi_json))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { store })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::albums::AlbumResponse;
    use crate::db_mongo::models::Album;
    use crate::store::InMemoryAlbumStore;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header},
        response::Response,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn send(
        app: Router,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_index_and_health() {
        let app = router(InMemoryAlbumStore::new());

        let response = send(app.clone(), Method::GET, "/", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"Hello world!");

        let response = send(app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["db_healthy"], true);
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let app = router(InMemoryAlbumStore::new());

        let response = send(
            app.clone(),
            Method::POST,
            "/api/v1/albums",
            Some(serde_json::json!({
                "name": "[Kind of Blue] featured by Miles Davis",
                "content": "content body for Kind of Blue",
                "albumId": 4
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: AlbumResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(created.id.len(), 24);

        let uri = format!("/api/v1/albums/{}", created.id);
        let response = send(app, Method::GET, &uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let fetched: AlbumResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.album_id, 4);
    }

    #[tokio::test]
    async fn test_list_returns_insertion_order() {
        let store = InMemoryAlbumStore::new();
        crate::seeder::run(&store, crate::seeder::SeedMode::Insert)
            .await
            .unwrap();
        let app = router(store);

        let response = send(app, Method::GET, "/api/v1/albums", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let albums: Vec<AlbumResponse> = serde_json::from_value(body_json(response).await).unwrap();
        let ids: Vec<i64> = albums.iter().map(|a| a.album_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_get_by_album_id() {
        let store = InMemoryAlbumStore::new();
        store.insert(Album::new("[Jeru] featured by Gerry Mulligan", "c", 2)).await.unwrap();
        let app = router(store);

        let response = send(app.clone(), Method::GET, "/api/v1/albums/by-album-id/2", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["name"], "[Jeru] featured by Gerry Mulligan");

        let response = send(app, Method::GET, "/api/v1/albums/by-album-id/9", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let store = InMemoryAlbumStore::new();
        let album = store.insert(Album::new("n", "c", 1)).await.unwrap();
        let id = album.id.unwrap().to_hex();
        let app = router(store);

        let uri = format!("/api/v1/albums/{id}");

        let response = send(app.clone(), Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let response = send(app.clone(), Method::GET, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "album not found");

        let response = send(app, Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_object_id_is_bad_request() {
        let app = router(InMemoryAlbumStore::new());
        let response = send(app, Method::GET, "/api/v1/albums/42", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_numeric_album_id_is_json_bad_request() {
        let app = router(InMemoryAlbumStore::new());
        let response = send(app, Method::GET, "/api/v1/albums/by-album-id/abc", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let json = body_json(response).await;
        assert!(json["message"].as_str().unwrap().contains("abc"));
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let app = router(InMemoryAlbumStore::new());
        let response = send(app, Method::GET, "/api-docs/openapi.json", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["info"]["title"], "Albums API");
        assert!(json["paths"]["/albums/{id}"]["delete"].is_object());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payloads() {
        let app = router(InMemoryAlbumStore::new());

        let response = send(
            app.clone(),
            Method::POST,
            "/api/v1/albums",
            Some(serde_json::json!({ "name": "n", "content": "c", "albumId": 0 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "albumId must be at least 1");

        let response = send(
            app,
            Method::POST,
            "/api/v1/albums",
            Some(serde_json::json!({ "name": "n" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
