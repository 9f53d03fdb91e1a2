use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, SqlErr};
use serde::{Deserialize, Serialize};

use super::changes::FacultyChanges;

/// A faculty member in the public directory.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "faculty")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,
    /// Unique across the directory.
    pub email: String,
    pub cabin: String,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub phone: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl FacultyChanges {
    /// Writes the `new` side of every carried field onto `active`.
    pub fn apply_to(&self, active: &mut ActiveModel) {
        if let Some(c) = &self.name {
            active.name = Set(c.new.clone());
        }
        if let Some(c) = &self.email {
            active.email = Set(c.new.clone());
        }
        if let Some(c) = &self.cabin {
            active.cabin = Set(c.new.clone());
        }
        if let Some(c) = &self.department {
            active.department = Set(Some(c.new.clone()));
        }
        if let Some(c) = &self.designation {
            active.designation = Set(Some(c.new.clone()));
        }
        if let Some(c) = &self.phone {
            active.phone = Set(Some(c.new.clone()));
        }
    }
}

impl Model {
    /// Inserts a new faculty record built from an addition change set.
    ///
    /// Required fields must already be validated; a missing one surfaces as a
    /// `DbErr` from the NOT NULL constraint.
    pub async fn create_from_changes<C: ConnectionTrait>(
        db: &C,
        changes: &FacultyChanges,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let mut active = ActiveModel {
            department: Set(None),
            designation: Set(None),
            phone: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        changes.apply_to(&mut active);
        active.insert(db).await
    }

    /// Applies `changes` onto the stored record.
    ///
    /// Returns `Ok(None)` if the record no longer exists.
    pub async fn apply_changes<C: ConnectionTrait>(
        db: &C,
        id: i64,
        changes: &FacultyChanges,
    ) -> Result<Option<Model>, DbErr> {
        let mut active = ActiveModel {
            id: sea_orm::ActiveValue::Unchanged(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        changes.apply_to(&mut active);

        match active.update(db).await {
            Ok(model) => Ok(Some(model)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_by_email<C: ConnectionTrait>(
        db: &C,
        email: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(email))
            .one(db)
            .await
    }

    pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool, DbErr> {
        let res = Entity::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }
}

/// Whether `err` is the unique index on `faculty.email` rejecting a write.
pub fn is_duplicate_email(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
