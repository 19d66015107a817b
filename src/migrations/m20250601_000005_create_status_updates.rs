//! Migration: Create status_updates table

use sea_orm_migration::prelude::*;

use super::m20250601_000004_create_applications::Applications;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StatusUpdates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StatusUpdates::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StatusUpdates::ApplicationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StatusUpdates::Status).string().not_null())
                    .col(ColumnDef::new(StatusUpdates::UpdatedBy).big_integer().not_null())
                    .col(ColumnDef::new(StatusUpdates::UpdatedByRole).string().not_null())
                    .col(ColumnDef::new(StatusUpdates::Remarks).text().null())
                    .col(
                        ColumnDef::new(StatusUpdates::IsVisibleToStudent)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(StatusUpdates::ActionType).string().not_null())
                    .col(ColumnDef::new(StatusUpdates::AttachmentUrl).string().null())
                    .col(
                        ColumnDef::new(StatusUpdates::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_status_updates_application_id")
                            .from(StatusUpdates::Table, StatusUpdates::ApplicationId)
                            .to(Applications::Table, Applications::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_status_updates_application_time")
                    .table(StatusUpdates::Table)
                    .col(StatusUpdates::ApplicationId)
                    .col(StatusUpdates::UpdatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StatusUpdates::Table).if_exists().to_owned())
            .await
    }
}

#[derive(Iden)]
#[iden = "status_updates"]
enum StatusUpdates {
    Table,
    Id,
    #[iden = "application_id"]
    ApplicationId,
    Status,
    #[iden = "updated_by"]
    UpdatedBy,
    #[iden = "updated_by_role"]
    UpdatedByRole,
    Remarks,
    #[iden = "is_visible_to_student"]
    IsVisibleToStudent,
    #[iden = "action_type"]
    ActionType,
    #[iden = "attachment_url"]
    AttachmentUrl,
    #[iden = "updated_at"]
    UpdatedAt,
}
