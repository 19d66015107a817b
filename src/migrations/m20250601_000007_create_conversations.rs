//! Migration: Create conversations table

use sea_orm_migration::prelude::*;

use super::m20250601_000001_create_students::Students;
use super::m20250601_000002_create_admins::Admins;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Conversations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Conversations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Conversations::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Conversations::AdminId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Conversations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_conversations_student_id")
                            .from(Conversations::Table, Conversations::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_conversations_admin_id")
                            .from(Conversations::Table, Conversations::AdminId)
                            .to(Admins::Table, Admins::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_conversations_student_admin")
                    .table(Conversations::Table)
                    .col(Conversations::StudentId)
                    .col(Conversations::AdminId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Conversations::Table).if_exists().to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Conversations {
    Table,
    Id,
    #[iden = "student_id"]
    StudentId,
    #[iden = "admin_id"]
    AdminId,
    #[iden = "created_at"]
    CreatedAt,
}
