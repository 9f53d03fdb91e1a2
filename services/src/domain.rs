use std::fmt::Debug;
use std::future::Future;

use chrono::{DateTime, Utc};
use db::models::proposal_status::{ProposalScope, ProposalStatus};
use sea_orm::{ConnectionTrait, DbErr};
use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ReviewError;

/// Whether a proposal creates a record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProposalKind {
    Addition,
    Update { target_id: i64 },
}

impl ProposalKind {
    pub fn from_target(target_id: Option<i64>) -> Self {
        match target_id {
            Some(target_id) => ProposalKind::Update { target_id },
            None => ProposalKind::Addition,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProposalKind::Addition => "addition",
            ProposalKind::Update { .. } => "update",
        }
    }
}

/// A stored proposal with its typed change set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Proposal<C> {
    pub id: i64,
    #[serde(flatten)]
    pub kind: ProposalKind,
    pub submitted_by: i64,
    pub changes: C,
    pub status: ProposalStatus,
    pub notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<i64>,
}

/// One reviewable record type (faculty, events) plugged into the generic
/// submission and review workflow.
///
/// Methods are associated functions over any connection so that the workflow
/// can run them inside its own transactions.
pub trait ReviewDomain: Send + Sync + 'static {
    /// Human-readable name used in messages ("Faculty", "Event").
    const LABEL: &'static str;

    type Record: Serialize + Clone + Debug + Send + Sync;
    type Payload: Validate + DeserializeOwned + Send + Sync;
    type Changes: Serialize + Clone + Debug + PartialEq + Send + Sync;

    /// Trims and blanks out the payload before it is validated or diffed.
    fn normalize(payload: Self::Payload) -> Self::Payload;

    /// Field-level diff of `payload` against `current`. With no current
    /// record every submitted field is a change.
    fn diff(current: Option<&Self::Record>, payload: Self::Payload) -> Self::Changes;

    fn is_empty(changes: &Self::Changes) -> bool;

    /// Required fields a new record would be missing.
    fn missing_required(changes: &Self::Changes) -> Vec<&'static str>;

    /// Short name of the record for notification text.
    fn describe(record: &Self::Record) -> String;

    /// Same as [`describe`](Self::describe), from a change set when no record exists.
    fn describe_changes(changes: &Self::Changes) -> Option<String>;

    fn record_id(record: &Self::Record) -> i64;

    /// Rejects a change set that would collide with another record on a
    /// unique field. `target_id` is the record being edited, if any.
    fn check_conflicts<C: ConnectionTrait>(
        db: &C,
        target_id: Option<i64>,
        changes: &Self::Changes,
    ) -> impl Future<Output = Result<(), ReviewError>> + Send;

    fn find_record<C: ConnectionTrait>(
        db: &C,
        id: i64,
    ) -> impl Future<Output = Result<Option<Self::Record>, DbErr>> + Send;

    fn list_records<C: ConnectionTrait>(
        db: &C,
    ) -> impl Future<Output = Result<Vec<Self::Record>, DbErr>> + Send;

    fn create_record<C: ConnectionTrait>(
        db: &C,
        changes: &Self::Changes,
    ) -> impl Future<Output = Result<Self::Record, ReviewError>> + Send;

    /// `Ok(None)` when the target record no longer exists.
    fn apply_changes<C: ConnectionTrait>(
        db: &C,
        id: i64,
        changes: &Self::Changes,
    ) -> impl Future<Output = Result<Option<Self::Record>, ReviewError>> + Send;

    fn delete_record<C: ConnectionTrait>(
        db: &C,
        id: i64,
    ) -> impl Future<Output = Result<bool, DbErr>> + Send;

    fn insert_proposal<C: ConnectionTrait>(
        db: &C,
        submitted_by: i64,
        target_id: Option<i64>,
        changes: Self::Changes,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<Proposal<Self::Changes>, DbErr>> + Send;

    fn find_pending<C: ConnectionTrait>(
        db: &C,
        id: i64,
        scope: ProposalScope,
    ) -> impl Future<Output = Result<Option<Proposal<Self::Changes>>, DbErr>> + Send;

    fn list_pending<C: ConnectionTrait>(
        db: &C,
        scope: ProposalScope,
    ) -> impl Future<Output = Result<Vec<Proposal<Self::Changes>>, DbErr>> + Send;

    fn list_by_submitter<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
    ) -> impl Future<Output = Result<Vec<Proposal<Self::Changes>>, DbErr>> + Send;

    /// Moves a still-pending proposal to a terminal status. `false` if it
    /// had already been reviewed.
    fn mark_reviewed<C: ConnectionTrait>(
        db: &C,
        id: i64,
        status: ProposalStatus,
        reviewer: i64,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<bool, DbErr>> + Send;
}
