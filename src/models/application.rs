use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Status every application enters on submission
pub const INITIAL_STATUS: &str = "Submitted";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub bursary_id: i64,
    pub application_date: DateTimeUtc,
    /// Mirrors the status of the latest `status_updates` row
    pub current_status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::bursary::Entity",
        from = "Column::BursaryId",
        to = "super::bursary::Column::Id",
        on_delete = "Cascade"
    )]
    Bursary,
    #[sea_orm(has_many = "super::status_update::Entity")]
    StatusUpdates,
    #[sea_orm(has_many = "super::document::Entity")]
    Documents,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::bursary::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bursary.def()
    }
}

impl Related<super::status_update::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StatusUpdates.def()
    }
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
