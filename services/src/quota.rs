//! Per-user daily submission quota.
//!
//! A window opens with a user's first submission and lasts 24 hours. Inside a
//! live window at most `limit` proposals are accepted; the first submission
//! after the window expires opens a new one with a count of 1.

use chrono::{DateTime, Duration, Utc};
use db::models::user;
use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::debug;

use crate::error::ReviewError;

pub const QUOTA_WINDOW_HOURS: i64 = 24;

pub fn window() -> Duration {
    Duration::hours(QUOTA_WINDOW_HOURS)
}

/// `true` when no window exists or the last one started 24h or more ago.
pub fn window_expired(last_update: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match last_update {
        None => true,
        Some(started) => now - started >= window(),
    }
}

/// Whether a submission at `now` would be accepted.
pub fn can_submit(
    update_count: i32,
    last_update: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    limit: u32,
) -> bool {
    if limit == 0 {
        return false;
    }
    window_expired(last_update, now) || update_count < limit as i32
}

/// Counter state after an accepted submission at `now`.
pub fn record_submission(
    update_count: i32,
    last_update: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> (i32, DateTime<Utc>) {
    match last_update {
        Some(started) if !window_expired(last_update, now) => (update_count + 1, started),
        _ => (1, now),
    }
}

/// When the current window ends. `None` if there is no live window.
pub fn reset_time(last_update: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match last_update {
        Some(started) if !window_expired(last_update, now) => Some(started + window()),
        _ => None,
    }
}

/// Quota snapshot reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaStatus {
    pub limit: u32,
    pub used: u32,
    pub remaining: u32,
    pub reset_time: Option<DateTime<Utc>>,
}

pub fn status(user: &user::Model, now: DateTime<Utc>, limit: u32) -> QuotaStatus {
    let used = if window_expired(user.last_update_date, now) {
        0
    } else {
        user.update_count.max(0) as u32
    };
    QuotaStatus {
        limit,
        used,
        remaining: limit.saturating_sub(used),
        reset_time: reset_time(user.last_update_date, now),
    }
}

/// Current quota snapshot for `user_id`.
pub async fn current_status<C: ConnectionTrait>(
    db: &C,
    user_id: i64,
    now: DateTime<Utc>,
    limit: u32,
) -> Result<QuotaStatus, ReviewError> {
    let user = user::Model::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| ReviewError::not_found(format!("User {user_id}")))?;
    Ok(status(&user, now, limit))
}

/// Takes one quota slot for `user_id` or fails with `RateLimitExceeded`.
///
/// Runs as guarded single-statement updates so concurrent reservations for
/// the same user cannot exceed `limit`. Call it inside the transaction that
/// stores the proposal: if that transaction rolls back, so does the slot.
pub async fn reserve<C: ConnectionTrait>(
    db: &C,
    user_id: i64,
    now: DateTime<Utc>,
    limit: u32,
) -> Result<(), ReviewError> {
    if limit > 0 {
        let cutoff = now - window();

        if user::Model::try_open_quota_window(db, user_id, now, cutoff).await? {
            debug!(user_id, "Opened new quota window");
            return Ok(());
        }
        if user::Model::try_take_quota_slot(db, user_id, now, cutoff, limit).await? {
            return Ok(());
        }
    }

    let user = user::Model::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| ReviewError::not_found(format!("User {user_id}")))?;

    Err(ReviewError::RateLimitExceeded {
        limit,
        reset_time: reset_time(user.last_update_date, now).unwrap_or(now + window()),
    })
}
