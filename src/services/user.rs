use std::sync::Arc;

use entity::user::Model as UserModel;
use tracing::info;
use uuid::Uuid;

use crate::services::{credentials::CredentialStore, notifications::Notifier, verification::TokenIssuer};
use crate::types::{error::AppError, token::TokenPurpose, user::UserPatch};
use crate::utils::token::hash_password_blocking;
use crate::utils::validation::{normalize_email, validate_email, validate_password};

/// Account maintenance: lookups, email change, password update and reset.
pub struct UserService {
    store: Arc<dyn CredentialStore>,
    tokens: Arc<TokenIssuer>,
    notifier: Arc<dyn Notifier>,
}

impl UserService {
    pub fn new(store: Arc<dyn CredentialStore>, tokens: Arc<TokenIssuer>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, tokens, notifier }
    }

    pub(crate) fn store(&self) -> &dyn CredentialStore {
        self.store.as_ref()
    }

    pub async fn get_user(&self, id: Uuid) -> Result<UserModel, AppError> {
        self.store
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User with this id not found.".into()))
    }

    /// Spends an email verification token and marks its owner verified.
    /// Serves both the signup link and the email change link.
    pub async fn verify_user_with_token(&self, token: &str) -> Result<UserModel, AppError> {
        if token.trim().is_empty() {
            return Err(AppError::Validation("token is not received.".into()));
        }
        let email = self.tokens.consume(token.trim(), TokenPurpose::EmailVerification).await?;
        let user = self
            .store
            .find_user_by_email(&email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        let user = self
            .store
            .update_user(user, UserPatch { is_verified: Some(true), ..Default::default() })
            .await?;
        info!("user {} verified their email", user.id);
        Ok(user)
    }

    /// Moves the account to `email`, drops it back to unverified and mails a
    /// fresh token to the new address. The mail is sent after the update
    /// commits; a send failure does not revert it.
    pub async fn update_email(&self, id: Uuid, email: &str) -> Result<(), AppError> {
        let email = normalize_email(email);
        validate_email(&email)?;

        let user = self.get_user(id).await?;
        if user.email != email && self.store.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("User with this email already exists.".into()));
        }

        self.store
            .update_user(user, UserPatch { email: Some(email.clone()), is_verified: Some(false), ..Default::default() })
            .await?;

        let token = self.tokens.issue(&email, TokenPurpose::EmailVerification).await?;
        self.notifier.send_email_change_confirmation(&email, &token).await?;
        info!("user {id} changed email, confirmation sent");
        Ok(())
    }

    pub async fn update_password(&self, id: Uuid, password: &str) -> Result<(), AppError> {
        validate_password(password)?;
        let user = self.get_user(id).await?;
        let hashed = hash_password_blocking(password.to_string()).await?;
        self.store
            .update_user(user, UserPatch { password: Some(hashed), ..Default::default() })
            .await?;
        info!("user {id} updated their password");
        Ok(())
    }

    /// `email` must be the address on file for `id`.
    pub async fn request_password_reset(&self, id: Uuid, email: &str) -> Result<(), AppError> {
        let email = normalize_email(email);
        let user = match self.store.find_user_by_id(id).await? {
            Some(user) if user.email == email => user,
            _ => return Err(AppError::Validation("This email is invalid".into())),
        };

        let token = self.tokens.issue(&user.email, TokenPurpose::PasswordReset).await?;
        self.notifier.send_password_reset_link(user.id, &user.email, &token).await?;
        info!("password reset link sent for user {}", user.id);
        Ok(())
    }

    /// Spends a password reset token and sets the new password on its owner.
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<(), AppError> {
        if token.trim().is_empty() {
            return Err(AppError::Validation("token is not received.".into()));
        }
        validate_password(password)?;

        // the token is only spent once the new hash exists
        let hashed = hash_password_blocking(password.to_string()).await?;

        let email = self.tokens.consume(token.trim(), TokenPurpose::PasswordReset).await?;
        let user = self
            .store
            .find_user_by_email(&email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        let id = user.id;
        self.store
            .update_user(user, UserPatch { password: Some(hashed), ..Default::default() })
            .await?;
        info!("user {id} reset their password");
        Ok(())
    }
}
