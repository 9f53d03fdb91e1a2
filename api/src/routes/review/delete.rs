use axum::{
    Json,
    extract::{Path, State},
};
use services::{ReviewDomain, ReviewService};
use util::state::AppState;

use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::routes::common::ApiError;

/// DELETE /api/{domain}/{id}
///
/// Admin only. Pending proposals that target the record are kept and will
/// fail with `404` if approved.
pub async fn delete_record<D: ReviewDomain>(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    ReviewService::<D>::from_state(&app_state)
        .delete_record(id)
        .await?;
    Ok(Json(ApiResponse::success(
        Empty,
        format!("{} deleted", D::LABEL),
    )))
}
