//! Migration: Create bursaries table

use sea_orm_migration::prelude::*;

use super::m20250601_000002_create_admins::Admins;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bursaries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bursaries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bursaries::Title).string().not_null())
                    .col(ColumnDef::new(Bursaries::Description).text().null())
                    .col(ColumnDef::new(Bursaries::Provider).string().null())
                    .col(ColumnDef::new(Bursaries::Amount).double().null())
                    .col(ColumnDef::new(Bursaries::Deadline).date().null())
                    .col(ColumnDef::new(Bursaries::CreatedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Bursaries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bursaries_created_by")
                            .from(Bursaries::Table, Bursaries::CreatedBy)
                            .to(Admins::Table, Admins::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bursaries::Table).if_exists().to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bursaries {
    Table,
    Id,
    Title,
    Description,
    Provider,
    Amount,
    Deadline,
    #[iden = "created_by"]
    CreatedBy,
    #[iden = "created_at"]
    CreatedAt,
}
