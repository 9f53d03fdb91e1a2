use axum::{
    Json,
    extract::{Path, State},
};
use services::{ReviewDomain, ReviewService};
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::{ApiError, JsonBody};

/// PUT /api/{domain}/{id}
///
/// Admin only. Writes the submitted fields straight onto the record; absent
/// fields keep their value.
///
/// ### Responses
/// - `200 OK` with the updated record
/// - `400 Bad Request` for a malformed value
/// - `404 Not Found` if no record has this id
/// - `409 Conflict` if the change would duplicate a unique field
pub async fn update_record<D: ReviewDomain>(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<D::Payload>,
) -> Result<Json<ApiResponse<D::Record>>, ApiError> {
    let record = ReviewService::<D>::from_state(&app_state)
        .update_record(id, payload)
        .await?;
    Ok(Json(ApiResponse::success(
        record,
        format!("{} updated", D::LABEL),
    )))
}
