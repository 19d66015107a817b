use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One immutable entry in an application's history.
///
/// Rows are only ever inserted; ordering by `(updated_at, id)` yields the
/// authoritative lifecycle of the parent application.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "status_updates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub application_id: i64,
    pub status: String,
    pub updated_by: i64,
    pub updated_by_role: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    pub is_visible_to_student: bool,
    pub action_type: String,
    pub attachment_url: Option<String>,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::application::Entity",
        from = "Column::ApplicationId",
        to = "super::application::Column::Id",
        on_delete = "Cascade"
    )]
    Application,
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
