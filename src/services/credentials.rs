use async_trait::async_trait;
use entity::user::Model as UserModel;
use uuid::Uuid;

use crate::types::{error::AppError, user::UserPatch};

/// Persistence for user records. Passwords arrive already hashed.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// `Conflict` when the email is taken, including when a concurrent insert
    /// won the race on the unique index.
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<UserModel, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserModel>, AppError>;

    /// Merges the set fields of `patch` into `user` and persists it.
    async fn update_user(&self, user: UserModel, patch: UserPatch) -> Result<UserModel, AppError>;
}
