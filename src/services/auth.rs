use std::sync::Arc;

use entity::user::Model as UserModel;
use tracing::{info, warn};

use crate::services::{notifications::Notifier, user::UserService, verification::TokenIssuer};
use crate::types::{error::AppError, token::TokenPurpose};
use crate::utils::jwt::SessionSigner;
use crate::utils::token::{hash_password_blocking, verify_password_blocking};
use crate::utils::validation::{normalize_email, validate_email, validate_password};

const BAD_CREDENTIALS: &str = "Email or password is invalid.";

/// Registration, email verification and login.
pub struct AuthService {
    users: Arc<UserService>,
    tokens: Arc<TokenIssuer>,
    notifier: Arc<dyn Notifier>,
    sessions: SessionSigner,
}

impl AuthService {
    pub fn new(
        users: Arc<UserService>,
        tokens: Arc<TokenIssuer>,
        notifier: Arc<dyn Notifier>,
        sessions: SessionSigner,
    ) -> Self {
        Self { users, tokens, notifier, sessions }
    }

    /// Creates an unverified user and mails a verification link.
    ///
    /// The existence check and the insert are separate statements; the unique
    /// index on `user.email` turns a lost race into `Conflict` as well.
    pub async fn register(&self, email: &str, password: &str) -> Result<(), AppError> {
        let email = normalize_email(email);
        validate_email(&email)?;
        validate_password(password)?;

        let store = self.users.store();
        if store.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("User with this email already exists.".into()));
        }

        let hashed = hash_password_blocking(password.to_string()).await?;
        let user = store.create_user(&email, &hashed).await?;

        let token = self.tokens.issue(&email, TokenPurpose::EmailVerification).await?;
        self.notifier.send_verification_email(&email, &token).await?;
        info!("registered user {}", user.id);
        Ok(())
    }

    pub async fn verify(&self, token: &str) -> Result<UserModel, AppError> {
        self.users.verify_user_with_token(token).await
    }

    /// Returns a signed session token. Unknown email and wrong password fail
    /// the same way.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let email = normalize_email(email);
        let user = self.users.store().find_user_by_email(&email).await?;

        let hash = user.as_ref().map(|u| u.password.clone());
        let valid = verify_password_blocking(password.to_string(), hash).await?;

        let user = match user {
            Some(user) if valid => user,
            _ => return Err(AppError::Validation(BAD_CREDENTIALS.into())),
        };

        if !user.is_verified {
            warn!("login refused for unverified user {}", user.id);
            return Err(AppError::Forbidden("Email not verified".into()));
        }

        self.sessions.sign(user.id)
    }
}
