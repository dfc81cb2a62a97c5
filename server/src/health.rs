use axum::{Json, extract::State};
use serde::Serialize;

use crate::{AppState, store::AlbumStore};

#[derive(Serialize)]
pub struct HealthCheckResponse {
    status: String,
    db_healthy: bool,
}

pub async fn health_check<S: AlbumStore>(
    State(state): State<AppState<S>>,
) -> Json<HealthCheckResponse> {
    let db_healthy = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Health check could not reach the album store: {e}");
            false
        }
    };
    let response = HealthCheckResponse {
        status: "ok".to_string(),
        db_healthy,
    };
    Json(response)
}
