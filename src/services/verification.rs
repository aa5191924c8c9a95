use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use entity::user_email_verification::Model as VerificationModel;
use tracing::debug;

use crate::types::{error::AppError, token::TokenPurpose};
use crate::utils::token::new_verification_token;

/// Row-level access to issued tokens.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    async fn insert_verification(&self, record: VerificationModel) -> Result<(), AppError>;

    async fn find_verification(&self, token: &str) -> Result<Option<VerificationModel>, AppError>;

    /// Sets `consumed_at` only if it is still empty. Returns whether this call
    /// did it, so two racing consumers cannot both win.
    async fn mark_verification_consumed(&self, token: &str, at: DateTime<Utc>) -> Result<bool, AppError>;
}

/// Issues opaque tokens and turns them back into the email they were issued
/// for. Tokens are single use and expire after `ttl`.
pub struct TokenIssuer {
    store: Arc<dyn VerificationStore>,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(store: Arc<dyn VerificationStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub async fn issue(&self, email: &str, purpose: TokenPurpose) -> Result<String, AppError> {
        let token = new_verification_token();
        let now = Utc::now();

        self.store
            .insert_verification(VerificationModel {
                token: token.clone(),
                email: email.to_string(),
                purpose: purpose.to_string(),
                created_at: now,
                expires_at: now + self.ttl,
                consumed_at: None,
            })
            .await
            .map_err(|e| AppError::Internal(format!("failed to store verification token: {e}")))?;

        debug!("issued {purpose} token");
        Ok(token)
    }

    /// Looks the token up without spending it.
    pub async fn resolve(&self, token: &str, purpose: TokenPurpose) -> Result<String, AppError> {
        let record = self.usable(token, purpose).await?;
        Ok(record.email)
    }

    /// Resolves and spends the token. A second call with the same token is
    /// `NotFound`.
    pub async fn consume(&self, token: &str, purpose: TokenPurpose) -> Result<String, AppError> {
        let record = self.usable(token, purpose).await?;
        if !self.store.mark_verification_consumed(&record.token, Utc::now()).await? {
            return Err(not_found());
        }
        debug!("consumed {purpose} token");
        Ok(record.email)
    }

    async fn usable(&self, token: &str, purpose: TokenPurpose) -> Result<VerificationModel, AppError> {
        if token.is_empty() {
            return Err(not_found());
        }
        let record = self.store.find_verification(token).await?.ok_or_else(not_found)?;

        let right_purpose = record.purpose.parse::<TokenPurpose>().ok() == Some(purpose);
        if !right_purpose || record.consumed_at.is_some() || record.expires_at <= Utc::now() {
            return Err(not_found());
        }
        Ok(record)
    }
}

// One message for every failure so callers cannot probe token state.
fn not_found() -> AppError {
    AppError::NotFound("verification failed".into())
}
