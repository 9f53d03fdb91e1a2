use crate::seed::Seeder;
use chrono::{Duration, Utc};
use db::models::changes::{EventChanges, FacultyChanges, FieldChange};
use db::models::{event, faculty, pending_event_update, pending_faculty_update, user};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

/// A handful of pending proposals from the fixed student so the review
/// queues are not empty. Does not touch the student's quota counters.
pub struct ProposalSeeder;

#[async_trait::async_trait]
impl Seeder for ProposalSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let Some(student) = user::Entity::find()
            .filter(user::Column::Username.eq("22BCE10001"))
            .one(db)
            .await?
        else {
            return Ok(());
        };
        let now = Utc::now();

        let addition = FacultyChanges {
            name: Some(FieldChange::added("Dr. Meera Nair".to_owned())),
            email: Some(FieldChange::added("meera.nair@vitbhopal.ac.in".to_owned())),
            cabin: Some(FieldChange::added("AB2-214".to_owned())),
            ..Default::default()
        };
        pending_faculty_update::Model::create(db, student.id, None, addition, now - Duration::hours(3))
            .await?;

        if let Some(target) = faculty::Model::list(db).await?.into_iter().next() {
            let update = FacultyChanges {
                cabin: Some(FieldChange::replaced(Some(target.cabin.clone()), "LC-101".to_owned())),
                ..Default::default()
            };
            pending_faculty_update::Model::create(db, student.id, Some(target.id), update, now - Duration::hours(2))
                .await?;
        }

        if let Some(target) = event::Model::list(db).await?.into_iter().next() {
            let update = EventChanges {
                venue: Some(FieldChange::replaced(Some(target.venue.clone()), "Auditorium".to_owned())),
                ..Default::default()
            };
            pending_event_update::Model::create(db, student.id, Some(target.id), update, now - Duration::hours(1))
                .await?;
        }
        Ok(())
    }
}
