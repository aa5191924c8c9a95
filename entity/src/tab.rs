use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tab")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub work_session_id: Uuid,            // FK -> work_session.id
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub url: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::work_session::Entity",
        from = "Column::WorkSessionId",
        to   = "super::work_session::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    WorkSession,
}

impl Related<super::work_session::Entity> for Entity {
    fn to() -> RelationDef { Relation::WorkSession.def() }
}

impl ActiveModelBehavior for ActiveModel {}
