use crate::db::postgres_service::PostgresService;
use crate::services::credentials::CredentialStore;
use crate::{
    types::{error::AppError, user::UserPatch},
    utils::token,
};
use async_trait::async_trait;
use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Entity as User, Model as UserModel};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set, SqlErr};
use uuid::Uuid;

fn unique_as_conflict(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("User with this email already exists.".into())
        }
        _ => err.into(),
    }
}

#[async_trait]
impl CredentialStore for PostgresService {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<UserModel, AppError> {
        let now = Utc::now();
        let user = UserActive {
            id: Set(token::new_id()),
            email: Set(email.to_string()),
            password: Set(password_hash.to_string()),
            is_verified: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(&self.database_connection)
            .await
            .map_err(unique_as_conflict)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(&self.database_connection)
            .await?)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserModel>, AppError> {
        Ok(User::find_by_id(id).one(&self.database_connection).await?)
    }

    async fn update_user(&self, user: UserModel, patch: UserPatch) -> Result<UserModel, AppError> {
        let mut am: UserActive = user.into();
        if let Some(email) = patch.email {
            am.email = Set(email);
        }
        if let Some(password) = patch.password {
            am.password = Set(password);
        }
        if let Some(is_verified) = patch.is_verified {
            am.is_verified = Set(is_verified);
        }
        am.updated_at = Set(Utc::now());

        am.update(&self.database_connection)
            .await
            .map_err(unique_as_conflict)
    }
}
