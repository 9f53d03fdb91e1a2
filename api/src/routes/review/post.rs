use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use chrono::Utc;
use db::models::proposal_status::ProposalScope;
use services::{Proposal, ReviewDomain, ReviewError, ReviewService};
use util::state::AppState;
use validator::Validate;

use crate::auth::{AuthUser, Claims};
use crate::response::ApiResponse;
use crate::routes::common::{
    ApiError, JsonBody, PendingUpdateCreated, ReviewRequest, SubmitUpdateRequest,
};

/// POST /api/{domain}
///
/// Admin only. Creates a record directly, without review or quota.
///
/// ### Responses
/// - `201 Created` with the new record
/// - `400 Bad Request` for a missing required field or malformed value
/// - `409 Conflict` if a unique field (faculty email) is taken
pub async fn create_record<D: ReviewDomain>(
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody<D::Payload>,
) -> Result<(StatusCode, Json<ApiResponse<D::Record>>), ApiError> {
    let record = ReviewService::<D>::from_state(&app_state)
        .create_record(payload)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(record, format!("{} created", D::LABEL))),
    ))
}

/// POST /api/{domain}/submit-addition
///
/// Proposes a new record for admin review. Counts against the caller's daily
/// quota.
///
/// ### Request Body (faculty)
/// ```json
/// { "name": "Dr. X", "email": "x@vitbhopal.ac.in", "cabin": "A1" }
/// ```
///
/// ### Responses
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": { "pendingUpdateId": 12 },
///   "message": "Faculty addition submitted for review"
/// }
/// ```
/// - `400 Bad Request` for a missing required field or malformed value
/// - `409 Conflict` if the faculty email already exists
/// - `429 Too Many Requests` once the daily quota is spent
/// ```json
/// {
///   "success": false,
///   "data": { "limit": 5, "resetTime": "2025-03-11T09:00:00Z" },
///   "message": "Daily update limit of 5 reached. Try again after 2025-03-11T09:00:00+00:00"
/// }
/// ```
pub async fn submit_addition<D: ReviewDomain>(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    JsonBody(payload): JsonBody<D::Payload>,
) -> Result<(StatusCode, Json<ApiResponse<PendingUpdateCreated>>), ApiError> {
    let proposal = ReviewService::<D>::from_state(&app_state)
        .submit_addition(claims.sub, payload, Utc::now())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            PendingUpdateCreated {
                pending_update_id: proposal.id,
            },
            format!("{} addition submitted for review", D::LABEL),
        )),
    ))
}

/// POST /api/{domain}/submit-update
///
/// Proposes changes to an existing record. Only fields whose value differs
/// from the stored record are kept. Counts against the daily quota.
///
/// ### Request Body (events)
/// ```json
/// { "eventId": 3, "title": "New Title", "date": "2024-12-05" }
/// ```
///
/// ### Responses
/// - `201 Created` with `{ "pendingUpdateId": 13 }`
/// - `400 Bad Request` with message `"No changes detected"` if nothing differs
/// - `404 Not Found` if the target record does not exist
/// - `429 Too Many Requests` once the daily quota is spent
pub async fn submit_update<D: ReviewDomain>(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    JsonBody(req): JsonBody<SubmitUpdateRequest<D::Payload>>,
) -> Result<(StatusCode, Json<ApiResponse<PendingUpdateCreated>>), ApiError> {
    let proposal = ReviewService::<D>::from_state(&app_state)
        .submit_update(claims.sub, req.target_id, req.fields, Utc::now())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            PendingUpdateCreated {
                pending_update_id: proposal.id,
            },
            format!("{} update submitted for review", D::LABEL),
        )),
    ))
}

async fn approve<D: ReviewDomain>(
    app_state: &AppState,
    claims: Claims,
    req: ReviewRequest,
    scope: ProposalScope,
) -> Result<Json<ApiResponse<D::Record>>, ApiError> {
    req.validate().map_err(ReviewError::from)?;
    let record = ReviewService::<D>::from_state(app_state)
        .approve(req.pending_update_id, scope, claims.sub, req.notes, Utc::now())
        .await?;
    Ok(Json(ApiResponse::success(
        record,
        format!("{} proposal approved", D::LABEL),
    )))
}

async fn reject<D: ReviewDomain>(
    app_state: &AppState,
    claims: Claims,
    req: ReviewRequest,
    scope: ProposalScope,
) -> Result<Json<ApiResponse<Proposal<D::Changes>>>, ApiError> {
    req.validate().map_err(ReviewError::from)?;
    let proposal = ReviewService::<D>::from_state(app_state)
        .reject(req.pending_update_id, scope, claims.sub, req.notes, Utc::now())
        .await?;
    Ok(Json(ApiResponse::success(
        proposal,
        format!("{} proposal rejected", D::LABEL),
    )))
}

/// POST /api/{domain}/approve-addition
///
/// Admin only. Creates the record from a pending addition and marks the
/// proposal approved; the submitter is notified by email.
///
/// ### Request Body
/// ```json
/// { "pendingUpdateId": 12, "notes": "Verified with the department" }
/// ```
///
/// ### Responses
/// - `200 OK` with the created record as `data`
/// - `404 Not Found` if no pending addition has this id (already reviewed, or an update)
/// - `409 Conflict` if the record would duplicate a unique field
pub async fn approve_addition<D: ReviewDomain>(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    JsonBody(req): JsonBody<ReviewRequest>,
) -> Result<Json<ApiResponse<D::Record>>, ApiError> {
    approve::<D>(&app_state, claims, req, ProposalScope::Additions).await
}

/// POST /api/{domain}/approve-update
///
/// Admin only. Applies the proposed values to the target record and marks
/// the proposal approved. Fails with `404` if the target has since been
/// deleted; the proposal then stays pending.
pub async fn approve_update<D: ReviewDomain>(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    JsonBody(req): JsonBody<ReviewRequest>,
) -> Result<Json<ApiResponse<D::Record>>, ApiError> {
    approve::<D>(&app_state, claims, req, ProposalScope::Updates).await
}

/// POST /api/{domain}/reject-addition
///
/// Admin only. Marks a pending addition rejected. No record is created.
pub async fn reject_addition<D: ReviewDomain>(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    JsonBody(req): JsonBody<ReviewRequest>,
) -> Result<Json<ApiResponse<Proposal<D::Changes>>>, ApiError> {
    reject::<D>(&app_state, claims, req, ProposalScope::Additions).await
}

/// POST /api/{domain}/reject-update
///
/// Admin only. Marks a pending update rejected. The record is left untouched.
pub async fn reject_update<D: ReviewDomain>(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    JsonBody(req): JsonBody<ReviewRequest>,
) -> Result<Json<ApiResponse<Proposal<D::Changes>>>, ApiError> {
    reject::<D>(&app_state, claims, req, ProposalScope::Updates).await
}
