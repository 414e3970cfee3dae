use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::state::AppState;

// GET /api/service-map
pub async fn service_map(State(state): State<Arc<AppState>>) -> Response {
    Json(state.catalog.as_ref()).into_response()
}
