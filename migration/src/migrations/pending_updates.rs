//! Shared table layout for the two pending-update tables.
//!
//! `target_id` deliberately has no foreign key: a proposal outlives the record
//! it targets so that approving it after a delete can be detected.

use sea_orm_migration::prelude::*;

pub fn create_table(table: &str) -> TableCreateStatement {
    Table::create()
        .table(Alias::new(table))
        .if_not_exists()
        .col(
            ColumnDef::new(Alias::new("id"))
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Alias::new("target_id")).big_integer().null())
        .col(ColumnDef::new(Alias::new("submitted_by")).big_integer().not_null())
        .col(ColumnDef::new(Alias::new("changes")).json().not_null())
        .col(
            ColumnDef::new(Alias::new("status"))
                .enumeration(
                    Alias::new("proposal_status"),
                    vec![
                        Alias::new("pending"),
                        Alias::new("approved"),
                        Alias::new("rejected"),
                    ],
                )
                .not_null()
                .default("pending"),
        )
        .col(ColumnDef::new(Alias::new("notes")).text().null())
        .col(
            ColumnDef::new(Alias::new("submitted_at"))
                .timestamp()
                .not_null()
                .default(Expr::cust("CURRENT_TIMESTAMP")),
        )
        .col(ColumnDef::new(Alias::new("reviewed_at")).timestamp().null())
        .col(ColumnDef::new(Alias::new("reviewed_by")).big_integer().null())
        .foreign_key(
            ForeignKey::create()
                .from(Alias::new(table), Alias::new("submitted_by"))
                .to(Alias::new("users"), Alias::new("id"))
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(Alias::new(table), Alias::new("reviewed_by"))
                .to(Alias::new("users"), Alias::new("id"))
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

pub fn create_status_index(table: &str) -> IndexCreateStatement {
    Index::create()
        .name(format!("idx_{table}_status_submitted_at"))
        .table(Alias::new(table))
        .col(Alias::new("status"))
        .col(Alias::new("submitted_at"))
        .if_not_exists()
        .to_owned()
}
