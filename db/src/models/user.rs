use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveValue::Set, Condition};
use serde::Serialize;

/// Represents a user in the `users` table.
///
/// Authentication is handled elsewhere; this table carries what the review
/// workflow needs: a notification address, the admin flag and the daily
/// submission quota.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique registration number.
    pub username: String,
    /// User's unique email address.
    pub email: String,
    /// Whether the user has admin privileges.
    pub admin: bool,
    /// Proposals submitted in the current quota window.
    pub update_count: i32,
    /// Start of the current quota window; `None` until the first submission.
    pub last_update_date: Option<DateTime<Utc>>,
    /// Timestamp when the user was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the user was last updated.
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        username: &str,
        email: &str,
        admin: bool,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            username: Set(username.to_owned()),
            email: Set(email.to_owned()),
            admin: Set(admin),
            update_count: Set(0),
            last_update_date: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Starts a fresh quota window if the current one began at or before
    /// `window_start_cutoff` (or none exists). The new window counts one
    /// submission.
    ///
    /// Returns `true` if this call opened the window.
    pub async fn try_open_quota_window<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        now: DateTime<Utc>,
        window_start_cutoff: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let res = Entity::update_many()
            .col_expr(Column::UpdateCount, Expr::value(1))
            .col_expr(Column::LastUpdateDate, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(user_id))
            .filter(
                Condition::any()
                    .add(Column::LastUpdateDate.is_null())
                    .add(Column::LastUpdateDate.lte(window_start_cutoff)),
            )
            .exec(db)
            .await?;
        Ok(res.rows_affected == 1)
    }

    /// Counts one more submission in the live window, as long as the count is
    /// still below `limit`. Single statement, so concurrent callers can never
    /// push the count past `limit`.
    ///
    /// Returns `true` if the slot was taken.
    pub async fn try_take_quota_slot<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        now: DateTime<Utc>,
        window_start_cutoff: DateTime<Utc>,
        limit: u32,
    ) -> Result<bool, DbErr> {
        let res = Entity::update_many()
            .col_expr(Column::UpdateCount, Expr::col(Column::UpdateCount).add(1))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(user_id))
            .filter(Column::LastUpdateDate.gt(window_start_cutoff))
            .filter(Column::UpdateCount.lt(limit as i32))
            .exec(db)
            .await?;
        Ok(res.rows_affected == 1)
    }
}
