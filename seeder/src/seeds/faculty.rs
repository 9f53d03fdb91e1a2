use crate::seed::Seeder;
use db::models::changes::{FacultyChanges, FieldChange};
use db::models::faculty::Model;
use fake::{Fake, faker::name::en::Name};
use sea_orm::{DatabaseConnection, DbErr};

pub struct FacultySeeder;

const DEPARTMENTS: &[&str] = &["SCSE", "SEEE", "SMEC", "SASL", "VITBS"];
const DESIGNATIONS: &[&str] = &["Assistant Professor", "Associate Professor", "Professor"];
const BLOCKS: &[&str] = &["AB1", "AB2", "LC"];

#[async_trait::async_trait]
impl Seeder for FacultySeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        for i in 0..20 {
            let name: String = Name().fake();
            let changes = FacultyChanges {
                name: Some(FieldChange::added(format!("Dr. {name}"))),
                email: Some(FieldChange::added(format!("faculty{i:03}@vitbhopal.ac.in"))),
                cabin: Some(FieldChange::added(format!(
                    "{}-{}",
                    BLOCKS[fastrand::usize(..BLOCKS.len())],
                    fastrand::u32(100..500)
                ))),
                department: Some(FieldChange::added(
                    DEPARTMENTS[fastrand::usize(..DEPARTMENTS.len())].to_owned(),
                )),
                designation: Some(FieldChange::added(
                    DESIGNATIONS[fastrand::usize(..DESIGNATIONS.len())].to_owned(),
                )),
                phone: None,
            };
            Model::create_from_changes(db, &changes).await?;
        }
        Ok(())
    }
}
