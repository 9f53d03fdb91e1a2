use crate::seed::Seeder;
use chrono::{Duration, Utc};
use db::models::changes::{EventChanges, FieldChange};
use db::models::event::{EventCategory, Model};
use fake::{Fake, faker::lorem::en::Sentence};
use sea_orm::{DatabaseConnection, DbErr};

pub struct EventSeeder;

const CATEGORIES: &[EventCategory] = &[
    EventCategory::Technical,
    EventCategory::Cultural,
    EventCategory::Sports,
    EventCategory::Workshop,
    EventCategory::Seminar,
    EventCategory::Other,
];
const VENUES: &[&str] = &["Auditorium", "Open Air Theatre", "AB1 Seminar Hall", "Sports Complex"];

#[async_trait::async_trait]
impl Seeder for EventSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let today = Utc::now().date_naive();
        for _ in 0..15 {
            let title: String = Sentence(2..5).fake();
            let changes = EventChanges {
                title: Some(FieldChange::added(title.trim_end_matches('.').to_owned())),
                date: Some(FieldChange::added(
                    today + Duration::days(fastrand::i64(-30..90)),
                )),
                venue: Some(FieldChange::added(
                    VENUES[fastrand::usize(..VENUES.len())].to_owned(),
                )),
                category: Some(FieldChange::added(
                    CATEGORIES[fastrand::usize(..CATEGORIES.len())],
                )),
                contact_email: Some(FieldChange::added("clubs@vitbhopal.ac.in".to_owned())),
                description: Some(FieldChange::added(Sentence(8..16).fake())),
                organizer: None,
                registration_link: None,
            };
            Model::create_from_changes(db, &changes).await?;
        }
        Ok(())
    }
}
