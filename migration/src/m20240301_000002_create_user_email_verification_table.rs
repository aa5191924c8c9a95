use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum UserEmailVerification {
    Table,
    Token,
    Email,
    Purpose,
    CreatedAt,
    ExpiresAt,
    ConsumedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(UserEmailVerification::Table)
                .if_not_exists()
                .col(ColumnDef::new(UserEmailVerification::Token).string_len(64).not_null().primary_key())
                .col(ColumnDef::new(UserEmailVerification::Email).string().not_null())
                .col(ColumnDef::new(UserEmailVerification::Purpose).string_len(32).not_null())
                .col(ColumnDef::new(UserEmailVerification::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(UserEmailVerification::ExpiresAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(UserEmailVerification::ConsumedAt).timestamp_with_time_zone().null())
                .to_owned(),
        ).await?;

        // lookups by owner when listing or purging a user's tokens
        m.create_index(
            Index::create()
                .name("idx_user_email_verification_email")
                .table(UserEmailVerification::Table)
                .col(UserEmailVerification::Email)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(
            Table::drop()
                .table(UserEmailVerification::Table)
                .if_exists()
                .to_owned(),
        ).await?;
        Ok(())
    }
}
