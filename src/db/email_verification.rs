use crate::db::postgres_service::PostgresService;
use crate::services::verification::VerificationStore;
use crate::types::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entity::user_email_verification::{
    ActiveModel as VerificationActive, Column, Entity as Verification, Model as VerificationModel,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use sea_orm::sea_query::Expr;

impl PostgresService {
    /// Hard-delete tokens that can no longer be used. Returns rows removed.
    pub async fn purge_verifications(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let res = Verification::delete_many()
            .filter(Column::ExpiresAt.lte(now).or(Column::ConsumedAt.is_not_null()))
            .exec(&self.database_connection)
            .await?;
        Ok(res.rows_affected)
    }
}

#[async_trait]
impl VerificationStore for PostgresService {
    async fn insert_verification(&self, record: VerificationModel) -> Result<(), AppError> {
        Verification::insert(VerificationActive {
            token: Set(record.token),
            email: Set(record.email),
            purpose: Set(record.purpose),
            created_at: Set(record.created_at),
            expires_at: Set(record.expires_at),
            consumed_at: Set(record.consumed_at),
        })
        .exec_without_returning(&self.database_connection)
        .await?;
        Ok(())
    }

    async fn find_verification(&self, token: &str) -> Result<Option<VerificationModel>, AppError> {
        Ok(Verification::find_by_id(token.to_string())
            .one(&self.database_connection)
            .await?)
    }

    async fn mark_verification_consumed(&self, token: &str, at: DateTime<Utc>) -> Result<bool, AppError> {
        let res = Verification::update_many()
            .col_expr(Column::ConsumedAt, Expr::value(at))
            .filter(Column::Token.eq(token))
            .filter(Column::ConsumedAt.is_null())
            .exec(&self.database_connection)
            .await?;
        Ok(res.rows_affected == 1)
    }
}
