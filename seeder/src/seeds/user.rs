use crate::seed::Seeder;
use db::models::user::Model;
use fake::{Fake, faker::internet::en::SafeEmail};
use sea_orm::{DatabaseConnection, DbErr};

pub struct UserSeeder;

#[async_trait::async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        // Fixed admin
        Model::create(db, "admin", "admin@vitbhopal.ac.in", true).await?;

        // Fixed student
        Model::create(db, "22BCE10001", "student@vitbhopal.ac.in", false).await?;

        for _ in 0..10 {
            let username = format!("22BCE{:05}", fastrand::u32(10_002..100_000));
            let email: String = SafeEmail().fake();
            Model::create(db, &username, &email, false).await?;
        }
        Ok(())
    }
}
