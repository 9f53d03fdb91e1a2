use super::pending_updates;
use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010003_create_pending_faculty_updates"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(pending_updates::create_table("pending_faculty_updates"))
            .await?;
        manager
            .create_index(pending_updates::create_status_index("pending_faculty_updates"))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("pending_faculty_updates")).to_owned())
            .await
    }
}
