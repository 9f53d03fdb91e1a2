use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{Condition, QueryOrder};
use serde::{Deserialize, Serialize};

use super::changes::FacultyChanges;
use super::proposal_status::{ProposalScope, ProposalStatus};

/// A proposed addition to, or change of, a faculty record.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pending_faculty_updates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Record being changed; `None` for an addition.
    pub target_id: Option<i64>,
    pub submitted_by: i64,

    #[sea_orm(column_type = "Json")]
    pub changes: FacultyChanges,

    pub status: ProposalStatus,
    pub notes: Option<String>,

    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::SubmittedBy",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Submitter,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submitter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn scope_condition(scope: ProposalScope) -> Condition {
    match scope {
        ProposalScope::Additions => Condition::all().add(Column::TargetId.is_null()),
        ProposalScope::Updates => Condition::all().add(Column::TargetId.is_not_null()),
    }
}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        submitted_by: i64,
        target_id: Option<i64>,
        changes: FacultyChanges,
        now: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            target_id: Set(target_id),
            submitted_by: Set(submitted_by),
            changes: Set(changes),
            status: Set(ProposalStatus::Pending),
            notes: Set(None),
            submitted_at: Set(now),
            reviewed_at: Set(None),
            reviewed_by: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Looks up a proposal that is still awaiting review within `scope`.
    pub async fn find_pending<C: ConnectionTrait>(
        db: &C,
        id: i64,
        scope: ProposalScope,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id)
            .filter(Column::Status.eq(ProposalStatus::Pending))
            .filter(scope_condition(scope))
            .one(db)
            .await
    }

    /// Pending proposals in `scope`, newest submission first.
    pub async fn list_pending<C: ConnectionTrait>(
        db: &C,
        scope: ProposalScope,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::Status.eq(ProposalStatus::Pending))
            .filter(scope_condition(scope))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// Every proposal a user has submitted, newest first.
    pub async fn list_by_submitter<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::SubmittedBy.eq(user_id))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// Moves a pending proposal to `status`. Only a row still in
    /// `pending` is touched, so a proposal is reviewed at most once.
    ///
    /// Returns `true` if this call performed the transition.
    pub async fn mark_reviewed<C: ConnectionTrait>(
        db: &C,
        id: i64,
        status: ProposalStatus,
        reviewer: i64,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let res = Entity::update_many()
            .col_expr(Column::Status, Expr::value(status))
            .col_expr(Column::ReviewedAt, Expr::value(now))
            .col_expr(Column::ReviewedBy, Expr::value(reviewer))
            .col_expr(Column::Notes, Expr::value(notes))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(ProposalStatus::Pending))
            .exec(db)
            .await?;
        Ok(res.rows_affected == 1)
    }
}
