//! Request/response bodies and error mapping shared by the route groups.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use services::ReviewError;
use tracing::{error, warn};
use validator::Validate;

use crate::auth::guards::Empty;
use crate::response::ApiResponse;

/// Body of `submit-update`: the target record id plus the proposed fields.
///
/// The id is accepted as `targetId`, `target_id`, `facultyId` or `eventId`.
#[derive(Debug, Deserialize)]
pub struct SubmitUpdateRequest<P> {
    #[serde(
        rename = "targetId",
        alias = "target_id",
        alias = "facultyId",
        alias = "eventId"
    )]
    pub target_id: i64,

    #[serde(flatten)]
    pub fields: P,
}

/// Body of the approve/reject endpoints.
#[derive(Debug, Deserialize, Validate)]
pub struct ReviewRequest {
    #[serde(rename = "pendingUpdateId", alias = "pending_update_id")]
    pub pending_update_id: i64,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingUpdateCreated {
    pub pending_update_id: i64,
}

/// `data` of a `429` response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitInfo {
    pub limit: u32,
    pub reset_time: DateTime<Utc>,
}

/// `Json<T>` whose rejection is a `400` in the usual response envelope, so an
/// unknown enum value, a bad date or a missing id reads like any other
/// validation failure.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ApiError(ReviewError::Validation(rejection.body_text()))),
        }
    }
}

/// Error returned by handlers; renders a `ReviewError` as an `ApiResponse`.
#[derive(Debug)]
pub struct ApiError(pub ReviewError);

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            ReviewError::RateLimitExceeded { limit, reset_time } => {
                let body = ApiResponse::error_with_data(
                    RateLimitInfo { limit, reset_time },
                    format!(
                        "Daily update limit of {limit} reached. Try again after {}",
                        reset_time.to_rfc3339()
                    ),
                );
                return (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
            }
            ReviewError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ReviewError::NoChangesDetected => {
                (StatusCode::BAD_REQUEST, "No changes detected".to_string())
            }
            ReviewError::Duplicate(msg) => (StatusCode::CONFLICT, msg),
            ReviewError::NotFound(msg) => (StatusCode::NOT_FOUND, format!("{msg} not found")),
            ReviewError::Transient(e) => {
                warn!(error = %e, "Transient database failure");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service temporarily unavailable, please retry".to_string(),
                )
            }
            ReviewError::Database(e) => {
                error!(error = %e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ApiResponse::<Empty>::error(message))).into_response()
    }
}
