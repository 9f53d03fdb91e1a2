use chrono::{DateTime, Utc};
use db::models::changes::FacultyChanges;
use db::models::faculty::{self, is_duplicate_email};
use db::models::pending_faculty_update;
use db::models::proposal_status::{ProposalScope, ProposalStatus};
use sea_orm::{ConnectionTrait, DbErr};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::diff::{clean, diff_field};
use crate::domain::{Proposal, ProposalKind, ReviewDomain};
use crate::error::ReviewError;

/// Faculty fields as submitted by a user. Every field is optional: for an
/// update only the edited ones need to be sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct FacultyPayload {
    #[validate(length(max = 120))]
    pub name: Option<String>,
    #[validate(email, length(max = 254))]
    pub email: Option<String>,
    #[validate(length(max = 40))]
    pub cabin: Option<String>,
    #[validate(length(max = 120))]
    pub department: Option<String>,
    #[validate(length(max = 120))]
    pub designation: Option<String>,
    #[validate(length(min = 7, max = 20))]
    pub phone: Option<String>,
}

impl From<pending_faculty_update::Model> for Proposal<FacultyChanges> {
    fn from(m: pending_faculty_update::Model) -> Self {
        Proposal {
            id: m.id,
            kind: ProposalKind::from_target(m.target_id),
            submitted_by: m.submitted_by,
            changes: m.changes,
            status: m.status,
            notes: m.notes,
            submitted_at: m.submitted_at,
            reviewed_at: m.reviewed_at,
            reviewed_by: m.reviewed_by,
        }
    }
}

fn map_write_err(err: DbErr) -> ReviewError {
    if is_duplicate_email(&err) {
        ReviewError::Duplicate("A faculty member with this email already exists".into())
    } else {
        err.into()
    }
}

pub struct FacultyDomain;

impl ReviewDomain for FacultyDomain {
    const LABEL: &'static str = "Faculty";

    type Record = faculty::Model;
    type Payload = FacultyPayload;
    type Changes = FacultyChanges;

    fn normalize(p: FacultyPayload) -> FacultyPayload {
        FacultyPayload {
            name: clean(p.name),
            email: clean(p.email),
            cabin: clean(p.cabin),
            department: clean(p.department),
            designation: clean(p.designation),
            phone: clean(p.phone),
        }
    }

    fn diff(current: Option<&faculty::Model>, p: FacultyPayload) -> FacultyChanges {
        FacultyChanges {
            name: diff_field(current.map(|r| &r.name), p.name),
            email: diff_field(current.map(|r| &r.email), p.email),
            cabin: diff_field(current.map(|r| &r.cabin), p.cabin),
            department: diff_field(current.and_then(|r| r.department.as_ref()), p.department),
            designation: diff_field(current.and_then(|r| r.designation.as_ref()), p.designation),
            phone: diff_field(current.and_then(|r| r.phone.as_ref()), p.phone),
        }
    }

    fn is_empty(changes: &FacultyChanges) -> bool {
        changes.is_empty()
    }

    fn missing_required(changes: &FacultyChanges) -> Vec<&'static str> {
        [
            ("name", changes.name.is_none()),
            ("email", changes.email.is_none()),
            ("cabin", changes.cabin.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, missing)| missing.then_some(field))
        .collect()
    }

    fn describe(record: &faculty::Model) -> String {
        record.name.clone()
    }

    fn describe_changes(changes: &FacultyChanges) -> Option<String> {
        changes.name.as_ref().map(|c| c.new.clone())
    }

    fn record_id(record: &faculty::Model) -> i64 {
        record.id
    }

    async fn check_conflicts<C: ConnectionTrait>(
        db: &C,
        target_id: Option<i64>,
        changes: &FacultyChanges,
    ) -> Result<(), ReviewError> {
        let Some(email) = &changes.email else {
            return Ok(());
        };
        match faculty::Model::find_by_email(db, &email.new).await? {
            Some(existing) if Some(existing.id) != target_id => Err(ReviewError::Duplicate(
                format!("A faculty member with email {} already exists", email.new),
            )),
            _ => Ok(()),
        }
    }

    async fn find_record<C: ConnectionTrait>(
        db: &C,
        id: i64,
    ) -> Result<Option<faculty::Model>, DbErr> {
        faculty::Model::find_by_id(db, id).await
    }

    async fn list_records<C: ConnectionTrait>(db: &C) -> Result<Vec<faculty::Model>, DbErr> {
        faculty::Model::list(db).await
    }

    async fn create_record<C: ConnectionTrait>(
        db: &C,
        changes: &FacultyChanges,
    ) -> Result<faculty::Model, ReviewError> {
        faculty::Model::create_from_changes(db, changes)
            .await
            .map_err(map_write_err)
    }

    async fn apply_changes<C: ConnectionTrait>(
        db: &C,
        id: i64,
        changes: &FacultyChanges,
    ) -> Result<Option<faculty::Model>, ReviewError> {
        faculty::Model::apply_changes(db, id, changes)
            .await
            .map_err(map_write_err)
    }

    async fn delete_record<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool, DbErr> {
        faculty::Model::delete(db, id).await
    }

    async fn insert_proposal<C: ConnectionTrait>(
        db: &C,
        submitted_by: i64,
        target_id: Option<i64>,
        changes: FacultyChanges,
        now: DateTime<Utc>,
    ) -> Result<Proposal<FacultyChanges>, DbErr> {
        pending_faculty_update::Model::create(db, submitted_by, target_id, changes, now)
            .await
            .map(Proposal::from)
    }

    async fn find_pending<C: ConnectionTrait>(
        db: &C,
        id: i64,
        scope: ProposalScope,
    ) -> Result<Option<Proposal<FacultyChanges>>, DbErr> {
        Ok(pending_faculty_update::Model::find_pending(db, id, scope)
            .await?
            .map(Proposal::from))
    }

    async fn list_pending<C: ConnectionTrait>(
        db: &C,
        scope: ProposalScope,
    ) -> Result<Vec<Proposal<FacultyChanges>>, DbErr> {
        let rows = pending_faculty_update::Model::list_pending(db, scope).await?;
        Ok(rows.into_iter().map(Proposal::from).collect())
    }

    async fn list_by_submitter<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
    ) -> Result<Vec<Proposal<FacultyChanges>>, DbErr> {
        let rows = pending_faculty_update::Model::list_by_submitter(db, user_id).await?;
        Ok(rows.into_iter().map(Proposal::from).collect())
    }

    async fn mark_reviewed<C: ConnectionTrait>(
        db: &C,
        id: i64,
        status: ProposalStatus,
        reviewer: i64,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        pending_faculty_update::Model::mark_reviewed(db, id, status, reviewer, notes, now).await
    }
}
