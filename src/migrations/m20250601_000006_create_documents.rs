//! Migration: Create documents table

use sea_orm_migration::prelude::*;

use super::m20250601_000001_create_students::Students;
use super::m20250601_000004_create_applications::Applications;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Documents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Documents::ApplicationId).big_integer().not_null())
                    .col(ColumnDef::new(Documents::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Documents::DocumentType).string().null())
                    .col(ColumnDef::new(Documents::FileName).string().not_null())
                    .col(ColumnDef::new(Documents::FilePath).string().not_null())
                    .col(
                        ColumnDef::new(Documents::UploadedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_documents_application_id")
                            .from(Documents::Table, Documents::ApplicationId)
                            .to(Applications::Table, Applications::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_documents_student_id")
                            .from(Documents::Table, Documents::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_documents_application_id")
                    .table(Documents::Table)
                    .col(Documents::ApplicationId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Documents::Table).if_exists().to_owned())
            .await
    }
}

#[derive(Iden)]
enum Documents {
    Table,
    Id,
    #[iden = "application_id"]
    ApplicationId,
    #[iden = "student_id"]
    StudentId,
    #[iden = "document_type"]
    DocumentType,
    #[iden = "file_name"]
    FileName,
    #[iden = "file_path"]
    FilePath,
    #[iden = "uploaded_at"]
    UploadedAt,
}
