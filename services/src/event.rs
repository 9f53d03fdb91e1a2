use chrono::{DateTime, NaiveDate, Utc};
use db::models::changes::EventChanges;
use db::models::event::{self, EventCategory};
use db::models::pending_event_update;
use db::models::proposal_status::{ProposalScope, ProposalStatus};
use sea_orm::{ConnectionTrait, DbErr};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::diff::{clean, deserialize_optional_day, diff_field};
use crate::domain::{Proposal, ProposalKind, ReviewDomain};
use crate::error::ReviewError;

/// Event fields as submitted by a user. `date` accepts `YYYY-MM-DD` or a
/// full timestamp and is stored as a calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct EventPayload {
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_day")]
    pub date: Option<NaiveDate>,
    #[validate(length(max = 120))]
    pub venue: Option<String>,
    pub category: Option<EventCategory>,
    #[serde(alias = "contactEmail")]
    #[validate(email)]
    pub contact_email: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(max = 120))]
    pub organizer: Option<String>,
    #[serde(alias = "registrationLink")]
    #[validate(url)]
    pub registration_link: Option<String>,
}

impl From<pending_event_update::Model> for Proposal<EventChanges> {
    fn from(m: pending_event_update::Model) -> Self {
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

pub struct EventDomain;

impl ReviewDomain for EventDomain {
    const LABEL: &'static str = "Event";

    type Record = event::Model;
    type Payload = EventPayload;
    type Changes = EventChanges;

    fn normalize(p: EventPayload) -> EventPayload {
        EventPayload {
            title: clean(p.title),
            date: p.date,
            venue: clean(p.venue),
            category: p.category,
            contact_email: clean(p.contact_email),
            description: clean(p.description),
            organizer: clean(p.organizer),
            registration_link: clean(p.registration_link),
        }
    }

    fn diff(current: Option<&event::Model>, p: EventPayload) -> EventChanges {
        EventChanges {
            title: diff_field(current.map(|r| &r.title), p.title),
            date: diff_field(current.map(|r| &r.date), p.date),
            venue: diff_field(current.map(|r| &r.venue), p.venue),
            category: diff_field(current.map(|r| &r.category), p.category),
            contact_email: diff_field(current.map(|r| &r.contact_email), p.contact_email),
            description: diff_field(current.and_then(|r| r.description.as_ref()), p.description),
            organizer: diff_field(current.and_then(|r| r.organizer.as_ref()), p.organizer),
            registration_link: diff_field(
                current.and_then(|r| r.registration_link.as_ref()),
                p.registration_link,
            ),
        }
    }

    fn is_empty(changes: &EventChanges) -> bool {
        changes.is_empty()
    }

    fn missing_required(changes: &EventChanges) -> Vec<&'static str> {
        [
            ("title", changes.title.is_none()),
            ("date", changes.date.is_none()),
            ("venue", changes.venue.is_none()),
            ("category", changes.category.is_none()),
            ("contact_email", changes.contact_email.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, missing)| missing.then_some(field))
        .collect()
    }

    fn describe(record: &event::Model) -> String {
        format!("{} ({})", record.title, record.date)
    }

    fn describe_changes(changes: &EventChanges) -> Option<String> {
        changes.title.as_ref().map(|c| c.new.clone())
    }

    fn record_id(record: &event::Model) -> i64 {
        record.id
    }

    async fn check_conflicts<C: ConnectionTrait>(
        _db: &C,
        _target_id: Option<i64>,
        _changes: &EventChanges,
    ) -> Result<(), ReviewError> {
        Ok(())
    }

    async fn find_record<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<event::Model>, DbErr> {
        event::Model::find_by_id(db, id).await
    }

    async fn list_records<C: ConnectionTrait>(db: &C) -> Result<Vec<event::Model>, DbErr> {
        event::Model::list(db).await
    }

    async fn create_record<C: ConnectionTrait>(
        db: &C,
        changes: &EventChanges,
    ) -> Result<event::Model, ReviewError> {
        Ok(event::Model::create_from_changes(db, changes).await?)
    }

    async fn apply_changes<C: ConnectionTrait>(
        db: &C,
        id: i64,
        changes: &EventChanges,
    ) -> Result<Option<event::Model>, ReviewError> {
        Ok(event::Model::apply_changes(db, id, changes).await?)
    }

    async fn delete_record<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool, DbErr> {
        event::Model::delete(db, id).await
    }

    async fn insert_proposal<C: ConnectionTrait>(
        db: &C,
        submitted_by: i64,
        target_id: Option<i64>,
        changes: EventChanges,
        now: DateTime<Utc>,
    ) -> Result<Proposal<EventChanges>, DbErr> {
        pending_event_update::Model::create(db, submitted_by, target_id, changes, now)
            .await
            .map(Proposal::from)
    }

    async fn find_pending<C: ConnectionTrait>(
        db: &C,
        id: i64,
        scope: ProposalScope,
    ) -> Result<Option<Proposal<EventChanges>>, DbErr> {
        Ok(pending_event_update::Model::find_pending(db, id, scope)
            .await?
            .map(Proposal::from))
    }

    async fn list_pending<C: ConnectionTrait>(
        db: &C,
        scope: ProposalScope,
    ) -> Result<Vec<Proposal<EventChanges>>, DbErr> {
        let rows = pending_event_update::Model::list_pending(db, scope).await?;
        Ok(rows.into_iter().map(Proposal::from).collect())
    }

    async fn list_by_submitter<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
    ) -> Result<Vec<Proposal<EventChanges>>, DbErr> {
        let rows = pending_event_update::Model::list_by_submitter(db, user_id).await?;
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
        pending_event_update::Model::mark_reviewed(db, id, status, reviewer, notes, now).await
    }
}
