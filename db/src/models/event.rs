use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::DeriveActiveEnum;
use sea_orm::QueryOrder;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::changes::EventChanges;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub title: String,
    pub date: NaiveDate,
    pub venue: String,
    pub category: EventCategory,
    pub contact_email: String,
    pub description: Option<String>,
    pub organizer: Option<String>,
    pub registration_link: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "event_category")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EventCategory {
    #[sea_orm(string_value = "technical")]
    Technical,

    #[sea_orm(string_value = "cultural")]
    Cultural,

    #[sea_orm(string_value = "sports")]
    Sports,

    #[sea_orm(string_value = "workshop")]
    Workshop,

    #[sea_orm(string_value = "seminar")]
    Seminar,

    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl EventChanges {
    /// Writes the `new` side of every carried field onto `active`.
    pub fn apply_to(&self, active: &mut ActiveModel) {
        if let Some(c) = &self.title {
            active.title = Set(c.new.clone());
        }
        if let Some(c) = &self.date {
            active.date = Set(c.new);
        }
        if let Some(c) = &self.venue {
            active.venue = Set(c.new.clone());
        }
        if let Some(c) = &self.category {
            active.category = Set(c.new);
        }
        if let Some(c) = &self.contact_email {
            active.contact_email = Set(c.new.clone());
        }
        if let Some(c) = &self.description {
            active.description = Set(Some(c.new.clone()));
        }
        if let Some(c) = &self.organizer {
            active.organizer = Set(Some(c.new.clone()));
        }
        if let Some(c) = &self.registration_link {
            active.registration_link = Set(Some(c.new.clone()));
        }
    }
}

impl Model {
    pub async fn create_from_changes<C: ConnectionTrait>(
        db: &C,
        changes: &EventChanges,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let mut active = ActiveModel {
            description: Set(None),
            organizer: Set(None),
            registration_link: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        changes.apply_to(&mut active);
        active.insert(db).await
    }

    /// Applies `changes` onto the stored event. `Ok(None)` if it was deleted.
    pub async fn apply_changes<C: ConnectionTrait>(
        db: &C,
        id: i64,
        changes: &EventChanges,
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

    /// All events, soonest first.
    pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool, DbErr> {
        let res = Entity::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }
}
