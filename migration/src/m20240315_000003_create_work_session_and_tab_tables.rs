use sea_orm_migration::prelude::*;

use crate::m20240301_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum WorkSession {
    Table,
    Id,
    UserId,
    Name,
    StartedAt,
    EndedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tab {
    Table,
    Id,
    WorkSessionId,
    Title,
    Url,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(WorkSession::Table)
                .if_not_exists()
                .col(ColumnDef::new(WorkSession::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(WorkSession::UserId).uuid().not_null())
                .col(ColumnDef::new(WorkSession::Name).string().not_null())
                .col(ColumnDef::new(WorkSession::StartedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(WorkSession::EndedAt).timestamp_with_time_zone().null())
                .col(ColumnDef::new(WorkSession::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(WorkSession::UpdatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_work_session_user")
                        .from(WorkSession::Table, WorkSession::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_work_session_user")
                .table(WorkSession::Table)
                .col(WorkSession::UserId)
                .to_owned(),
        ).await?;

        m.create_table(
            Table::create()
                .table(Tab::Table)
                .if_not_exists()
                .col(ColumnDef::new(Tab::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Tab::WorkSessionId).uuid().not_null())
                .col(ColumnDef::new(Tab::Title).string().not_null())
                .col(ColumnDef::new(Tab::Url).text().not_null())
                .col(ColumnDef::new(Tab::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Tab::UpdatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_tab_work_session")
                        .from(Tab::Table, Tab::WorkSessionId)
                        .to(WorkSession::Table, WorkSession::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_tab_work_session")
                .table(Tab::Table)
                .col(Tab::WorkSessionId)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Tab::Table).if_exists().to_owned()).await?;
        m.drop_table(Table::drop().table(WorkSession::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
