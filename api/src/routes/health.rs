use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use util::state::AppState;

use crate::response::ApiResponse;

/// Builds the `/health` route group.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// GET /health
///
/// Reports whether the API is up and can reach its database.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// { "success": true, "data": "OK", "message": "Health check passed" }
/// ```
/// - `503 Service Unavailable` if the database does not answer
async fn health_check(State(app_state): State<AppState>) -> (StatusCode, Json<ApiResponse<&'static str>>) {
    match app_state.db().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success("OK", "Health check passed")),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::error("Database unavailable")),
            )
        }
    }
}
