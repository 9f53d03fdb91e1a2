use axum::{Extension, Json, extract::State};
use chrono::Utc;
use services::quota::{self, QuotaStatus};
use util::{config, state::AppState};

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::ApiError;

/// GET /api/me/update-quota
///
/// The caller's daily submission quota. The quota is shared by faculty and
/// event proposals.
///
/// ### Response
/// ```json
/// {
///   "success": true,
///   "data": { "limit": 5, "used": 2, "remaining": 3, "resetTime": "2025-03-11T09:00:00Z" },
///   "message": "Update quota retrieved"
/// }
/// ```
/// `resetTime` is `null` when no window is open.
pub async fn get_update_quota(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Result<Json<ApiResponse<QuotaStatus>>, ApiError> {
    let status = quota::current_status(
        app_state.db(),
        claims.sub,
        Utc::now(),
        config::daily_update_limit(),
    )
    .await?;
    Ok(Json(ApiResponse::success(status, "Update quota retrieved")))
}
