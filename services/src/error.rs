use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

/// Everything that can stop a submission, a review or a record edit.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Payload or resulting record breaks a field rule.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A unique field (faculty email) is already taken.
    #[error("{0}")]
    Duplicate(String),

    #[error("{0} not found")]
    NotFound(String),

    /// An update whose diff against the current record is empty.
    #[error("No changes detected")]
    NoChangesDetected,

    #[error("Daily update limit of {limit} reached")]
    RateLimitExceeded {
        limit: u32,
        reset_time: DateTime<Utc>,
    },

    /// Connection-level failure; nothing was committed and the call may be retried.
    #[error("Database temporarily unavailable: {0}")]
    Transient(DbErr),

    #[error("Database error: {0}")]
    Database(DbErr),
}

impl ReviewError {
    pub fn not_found(what: impl Into<String>) -> Self {
        ReviewError::NotFound(what.into())
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, ReviewError::Transient(_))
    }
}

impl From<DbErr> for ReviewError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => ReviewError::Transient(err),
            other => ReviewError::Database(other),
        }
    }
}

impl From<ValidationErrors> for ReviewError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let codes: Vec<String> = errs.iter().map(|e| e.code.to_string()).collect();
                format!("{field} ({})", codes.join(", "))
            })
            .collect();
        fields.sort();
        ReviewError::Validation(format!("invalid fields: {}", fields.join("; ")))
    }
}
