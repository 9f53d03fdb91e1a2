//! Submission and review workflow shared by every [`ReviewDomain`].
//!
//! Submissions reserve a quota slot, diff the payload and store the proposal
//! in one transaction. Reviews apply the change set and close the proposal in
//! one transaction, then notify the submitter once it has committed.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use db::models::proposal_status::{ProposalScope, ProposalStatus};
use db::models::user;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{info, warn};
use util::config;
use util::notify::{Notification, NotificationQueue};
use util::state::AppState;
use validator::Validate;

use crate::domain::{Proposal, ProposalKind, ReviewDomain};
use crate::error::ReviewError;
use crate::quota;

/// Outcome of a review, as reported to the submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    fn status(self) -> ProposalStatus {
        match self {
            Decision::Approve => ProposalStatus::Approved,
            Decision::Reject => ProposalStatus::Rejected,
        }
    }
}

pub struct ReviewService<D> {
    db: DatabaseConnection,
    notifications: NotificationQueue,
    daily_limit: u32,
    _domain: PhantomData<fn() -> D>,
}

impl<D: ReviewDomain> ReviewService<D> {
    pub fn new(db: DatabaseConnection, notifications: NotificationQueue) -> Self {
        Self {
            db,
            notifications,
            daily_limit: config::daily_update_limit(),
            _domain: PhantomData,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.db_clone(), state.notifications().clone())
    }

    pub fn with_daily_limit(mut self, limit: u32) -> Self {
        self.daily_limit = limit;
        self
    }

    fn validated(payload: D::Payload) -> Result<D::Payload, ReviewError> {
        let payload = D::normalize(payload);
        payload.validate()?;
        Ok(payload)
    }

    /// Proposes a brand-new record. Every required field must be present.
    pub async fn submit_addition(
        &self,
        user_id: i64,
        payload: D::Payload,
        now: DateTime<Utc>,
    ) -> Result<Proposal<D::Changes>, ReviewError> {
        let txn = self.db.begin().await?;
        quota::reserve(&txn, user_id, now, self.daily_limit).await?;

        let changes = D::diff(None, Self::validated(payload)?);
        require_fields::<D>(&changes)?;
        D::check_conflicts(&txn, None, &changes).await?;

        let proposal = D::insert_proposal(&txn, user_id, None, changes, now).await?;
        txn.commit().await?;

        info!(
            domain = D::LABEL,
            proposal_id = proposal.id,
            user_id,
            "Addition submitted for review"
        );
        Ok(proposal)
    }

    /// Proposes changes to record `target_id`. Only fields that differ from
    /// the stored record are kept; an empty diff is refused.
    pub async fn submit_update(
        &self,
        user_id: i64,
        target_id: i64,
        payload: D::Payload,
        now: DateTime<Utc>,
    ) -> Result<Proposal<D::Changes>, ReviewError> {
        let txn = self.db.begin().await?;
        quota::reserve(&txn, user_id, now, self.daily_limit).await?;

        let payload = Self::validated(payload)?;
        let current = D::find_record(&txn, target_id)
            .await?
            .ok_or_else(|| ReviewError::not_found(format!("{} {target_id}", D::LABEL)))?;

        let changes = D::diff(Some(&current), payload);
        if D::is_empty(&changes) {
            return Err(ReviewError::NoChangesDetected);
        }
        D::check_conflicts(&txn, Some(target_id), &changes).await?;

        let proposal = D::insert_proposal(&txn, user_id, Some(target_id), changes, now).await?;
        txn.commit().await?;

        info!(
            domain = D::LABEL,
            proposal_id = proposal.id,
            target_id,
            user_id,
            "Update submitted for review"
        );
        Ok(proposal)
    }

    /// Pending proposals in `scope`, newest first.
    pub async fn list_pending(
        &self,
        scope: ProposalScope,
    ) -> Result<Vec<Proposal<D::Changes>>, ReviewError> {
        Ok(D::list_pending(&self.db, scope).await?)
    }

    /// Every proposal `user_id` has submitted in this domain, newest first.
    pub async fn my_submissions(&self, user_id: i64) -> Result<Vec<Proposal<D::Changes>>, ReviewError> {
        Ok(D::list_by_submitter(&self.db, user_id).await?)
    }

    /// Applies a pending proposal and marks it approved.
    ///
    /// Fails with `NotFound` if the proposal is not pending in `scope`, or if
    /// the record an update targets has been deleted. Nothing is written on
    /// failure.
    pub async fn approve(
        &self,
        proposal_id: i64,
        scope: ProposalScope,
        reviewer: i64,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<D::Record, ReviewError> {
        let txn = self.db.begin().await?;
        let proposal = D::find_pending(&txn, proposal_id, scope)
            .await?
            .ok_or_else(|| pending_not_found::<D>(proposal_id))?;

        let record = match proposal.kind {
            ProposalKind::Addition => {
                require_fields::<D>(&proposal.changes)?;
                D::create_record(&txn, &proposal.changes).await?
            }
            ProposalKind::Update { target_id } => D::apply_changes(&txn, target_id, &proposal.changes)
                .await?
                .ok_or_else(|| ReviewError::not_found(format!("{} {target_id}", D::LABEL)))?,
        };

        let notes = clean_notes(notes);
        let closed = D::mark_reviewed(&txn, proposal_id, Decision::Approve.status(), reviewer, notes.clone(), now).await?;
        if !closed {
            return Err(pending_not_found::<D>(proposal_id));
        }
        txn.commit().await?;

        info!(
            domain = D::LABEL,
            proposal_id,
            record_id = D::record_id(&record),
            reviewer,
            "Proposal approved"
        );
        self.notify_submitter(&proposal, Decision::Approve, Some(D::describe(&record)), notes)
            .await;
        Ok(record)
    }

    /// Marks a pending proposal rejected without touching any record.
    pub async fn reject(
        &self,
        proposal_id: i64,
        scope: ProposalScope,
        reviewer: i64,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Proposal<D::Changes>, ReviewError> {
        let txn = self.db.begin().await?;
        let mut proposal = D::find_pending(&txn, proposal_id, scope)
            .await?
            .ok_or_else(|| pending_not_found::<D>(proposal_id))?;

        let notes = clean_notes(notes);
        let closed = D::mark_reviewed(&txn, proposal_id, Decision::Reject.status(), reviewer, notes.clone(), now).await?;
        if !closed {
            return Err(pending_not_found::<D>(proposal_id));
        }

        let subject = match proposal.kind {
            ProposalKind::Update { target_id } => D::find_record(&txn, target_id)
                .await?
                .map(|r| D::describe(&r)),
            ProposalKind::Addition => None,
        };
        txn.commit().await?;

        proposal.status = ProposalStatus::Rejected;
        proposal.reviewed_at = Some(now);
        proposal.reviewed_by = Some(reviewer);
        proposal.notes = notes.clone();

        info!(domain = D::LABEL, proposal_id, reviewer, "Proposal rejected");
        self.notify_submitter(&proposal, Decision::Reject, subject, notes)
            .await;
        Ok(proposal)
    }

    /// Best-effort notice to the submitter. Never fails the review.
    async fn notify_submitter(
        &self,
        proposal: &Proposal<D::Changes>,
        decision: Decision,
        subject: Option<String>,
        notes: Option<String>,
    ) {
        let submitter = match user::Model::find_by_id(&self.db, proposal.submitted_by).await {
            Ok(Some(u)) => u,
            Ok(None) => {
                warn!(user_id = proposal.submitted_by, "Submitter no longer exists; skipping notification");
                return;
            }
            Err(e) => {
                warn!(error = %e, user_id = proposal.submitted_by, "Could not load submitter for notification");
                return;
            }
        };

        let name = subject
            .or_else(|| D::describe_changes(&proposal.changes))
            .unwrap_or_else(|| format!("#{}", proposal.id));
        let notification = review_notification::<D>(
            &submitter,
            proposal.kind,
            decision.status(),
            &name,
            notes.as_deref(),
        );
        self.notifications.enqueue(notification);
    }
}

/// Plain-text notice telling a submitter how their proposal was decided.
pub fn review_notification<D: ReviewDomain>(
    submitter: &user::Model,
    kind: ProposalKind,
    status: ProposalStatus,
    name: &str,
    notes: Option<&str>,
) -> Notification {
    let subject = format!("Your {} {} was {status}", D::LABEL.to_lowercase(), kind.label());

    let mut body = format!(
        "Hi {},\n\nYour proposed {} for {} \"{name}\" was {status} by an administrator.\n",
        submitter.username,
        kind.label(),
        D::LABEL.to_lowercase(),
    );
    if let Some(notes) = notes {
        body.push_str(&format!("\nReviewer notes: {notes}\n"));
    }
    body.push_str(&format!("\nView it at {}\n", config::frontend_url()));

    Notification::new(submitter.email.clone(), subject, body)
}

fn pending_not_found<D: ReviewDomain>(proposal_id: i64) -> ReviewError {
    ReviewError::not_found(format!("Pending {} {proposal_id}", D::LABEL.to_lowercase()))
}

fn require_fields<D: ReviewDomain>(changes: &D::Changes) -> Result<(), ReviewError> {
    let missing = D::missing_required(changes);
    if missing.is_empty() {
        return Ok(());
    }
    Err(ReviewError::Validation(format!(
        "missing required fields: {}",
        missing.join(", ")
    )))
}

fn clean_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_owned())
        .filter(|n| !n.is_empty())
}

/// Direct record management for administrators, bypassing review and quota.
impl<D: ReviewDomain> ReviewService<D> {
    pub async fn list_records(&self) -> Result<Vec<D::Record>, ReviewError> {
        Ok(D::list_records(&self.db).await?)
    }

    pub async fn get_record(&self, id: i64) -> Result<D::Record, ReviewError> {
        D::find_record(&self.db, id)
            .await?
            .ok_or_else(|| ReviewError::not_found(format!("{} {id}", D::LABEL)))
    }

    pub async fn create_record(&self, payload: D::Payload) -> Result<D::Record, ReviewError> {
        let changes = D::diff(None, Self::validated(payload)?);
        require_fields::<D>(&changes)?;

        let txn = self.db.begin().await?;
        D::check_conflicts(&txn, None, &changes).await?;
        let record = D::create_record(&txn, &changes).await?;
        txn.commit().await?;

        info!(domain = D::LABEL, record_id = D::record_id(&record), "Record created");
        Ok(record)
    }

    /// Writes the submitted fields straight onto record `id`. A payload that
    /// matches the stored record returns it unchanged.
    pub async fn update_record(&self, id: i64, payload: D::Payload) -> Result<D::Record, ReviewError> {
        let payload = Self::validated(payload)?;

        let txn = self.db.begin().await?;
        let current = D::find_record(&txn, id)
            .await?
            .ok_or_else(|| ReviewError::not_found(format!("{} {id}", D::LABEL)))?;

        let changes = D::diff(Some(&current), payload);
        if D::is_empty(&changes) {
            return Ok(current);
        }
        D::check_conflicts(&txn, Some(id), &changes).await?;

        let record = D::apply_changes(&txn, id, &changes)
            .await?
            .ok_or_else(|| ReviewError::not_found(format!("{} {id}", D::LABEL)))?;
        txn.commit().await?;

        info!(domain = D::LABEL, record_id = id, "Record updated");
        Ok(record)
    }

    pub async fn delete_record(&self, id: i64) -> Result<(), ReviewError> {
        if !D::delete_record(&self.db, id).await? {
            return Err(ReviewError::not_found(format!("{} {id}", D::LABEL)));
        }
        info!(domain = D::LABEL, record_id = id, "Record deleted");
        Ok(())
    }
}
