//! Migration: Create applications table
//!
//! One row per (student, bursary) pair, enforced by a unique index.

use sea_orm_migration::prelude::*;

use super::m20250601_000001_create_students::Students;
use super::m20250601_000003_create_bursaries::Bursaries;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Applications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Applications::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Applications::BursaryId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Applications::ApplicationDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Applications::CurrentStatus)
                            .string()
                            .not_null()
                            .default("Submitted"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applications_student_id")
                            .from(Applications::Table, Applications::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applications_bursary_id")
                            .from(Applications::Table, Applications::BursaryId)
                            .to(Bursaries::Table, Bursaries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_applications_student_bursary")
                    .table(Applications::Table)
                    .col(Applications::StudentId)
                    .col(Applications::BursaryId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_applications_bursary_id")
                    .table(Applications::Table)
                    .col(Applications::BursaryId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Applications::Table).if_exists().to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Applications {
    Table,
    Id,
    #[iden = "student_id"]
    StudentId,
    #[iden = "bursary_id"]
    BursaryId,
    #[iden = "application_date"]
    ApplicationDate,
    #[iden = "current_status"]
    CurrentStatus,
}
