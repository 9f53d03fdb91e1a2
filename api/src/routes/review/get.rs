use axum::{
    Extension, Json,
    extract::{Path, State},
};
use db::models::proposal_status::ProposalScope;
use serde::Serialize;
use services::{Proposal, ReviewDomain, ReviewService};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::ApiError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAdditions<C: Serialize> {
    pub pending_additions: Vec<Proposal<C>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingUpdates<C: Serialize> {
    pub pending_updates: Vec<Proposal<C>>,
}

#[derive(Serialize)]
pub struct Submissions<C: Serialize> {
    pub submissions: Vec<Proposal<C>>,
}

/// GET /api/{domain}
///
/// Lists every record of the domain. Faculty are ordered by name, events by
/// date (soonest first).
///
/// ### Responses
/// - `200 OK` with the records as `data`
/// - `401 Unauthorized` without a valid token
pub async fn list_records<D: ReviewDomain>(
    State(app_state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<D::Record>>>, ApiError> {
    let records = ReviewService::<D>::from_state(&app_state).list_records().await?;
    Ok(Json(ApiResponse::success(
        records,
        format!("{} records retrieved", D::LABEL),
    )))
}

/// GET /api/{domain}/{id}
///
/// ### Responses
/// - `200 OK` with the record as `data`
/// - `404 Not Found` if no record has this id
pub async fn get_record<D: ReviewDomain>(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<D::Record>>, ApiError> {
    let record = ReviewService::<D>::from_state(&app_state).get_record(id).await?;
    Ok(Json(ApiResponse::success(
        record,
        format!("{} retrieved", D::LABEL),
    )))
}

/// GET /api/{domain}/pending-additions
///
/// Admin only. Proposals for new records that are still awaiting review,
/// newest submission first.
///
/// ### Response
/// ```json
/// {
///   "success": true,
///   "data": {
///     "pendingAdditions": [
///       {
///         "id": 12,
///         "kind": "addition",
///         "submitted_by": 4,
///         "changes": { "name": { "old": null, "new": "Dr. X" } },
///         "status": "pending",
///         "notes": null,
///         "submitted_at": "2025-03-10T09:00:00Z",
///         "reviewed_at": null,
///         "reviewed_by": null
///       }
///     ]
///   },
///   "message": "Pending faculty additions retrieved"
/// }
/// ```
pub async fn pending_additions<D: ReviewDomain>(
    State(app_state): State<AppState>,
) -> Result<Json<ApiResponse<PendingAdditions<D::Changes>>>, ApiError> {
    let pending_additions = ReviewService::<D>::from_state(&app_state)
        .list_pending(ProposalScope::Additions)
        .await?;
    Ok(Json(ApiResponse::success(
        PendingAdditions { pending_additions },
        format!("Pending {} additions retrieved", D::LABEL.to_lowercase()),
    )))
}

/// GET /api/{domain}/pending-updates
///
/// Admin only. Proposals against existing records that are still awaiting
/// review, newest submission first. Each entry carries `"kind": "update"` and
/// the `target_id` it edits; `changes` holds only the fields that differ.
pub async fn pending_updates<D: ReviewDomain>(
    State(app_state): State<AppState>,
) -> Result<Json<ApiResponse<PendingUpdates<D::Changes>>>, ApiError> {
    let pending_updates = ReviewService::<D>::from_state(&app_state)
        .list_pending(ProposalScope::Updates)
        .await?;
    Ok(Json(ApiResponse::success(
        PendingUpdates { pending_updates },
        format!("Pending {} updates retrieved", D::LABEL.to_lowercase()),
    )))
}

/// GET /api/{domain}/my-submissions
///
/// The caller's own proposals in this domain, in every state, newest first.
pub async fn my_submissions<D: ReviewDomain>(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Submissions<D::Changes>>>, ApiError> {
    let submissions = ReviewService::<D>::from_state(&app_state)
        .my_submissions(claims.sub)
        .await?;
    Ok(Json(ApiResponse::success(
        Submissions { submissions },
        "Submissions retrieved",
    )))
}
