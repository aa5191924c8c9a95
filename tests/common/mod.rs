#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Duration;
use sea_orm::ConnectOptions;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use timetrack_auth::config::JwtConfig;
use timetrack_auth::db::postgres_service::PostgresService;
use timetrack_auth::services::notifications::Notifier;
use timetrack_auth::state::AppState;
use timetrack_auth::types::error::AppError;
use uuid::Uuid;

pub const PASSWORD: &str = "correct-horse-battery";

/// A mail the services asked to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Verification { email: String, token: String },
    EmailChange { email: String, token: String },
    PasswordReset { user_id: Uuid, email: String, token: String },
}

impl Sent {
    pub fn token(&self) -> &str {
        match self {
            Sent::Verification { token, .. }
            | Sent::EmailChange { token, .. }
            | Sent::PasswordReset { token, .. } => token,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Sent::Verification { email, .. }
            | Sent::EmailChange { email, .. }
            | Sent::PasswordReset { email, .. } => email,
        }
    }
}

/// Keeps every message in memory instead of sending it. Can be switched
/// into a failing mode to simulate a provider outage.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Sent>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> Sent {
        self.sent().last().cloned().expect("no mail was sent")
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn record(&self, mail: Sent) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Internal("mail provider unavailable".into()));
        }
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_verification_email(&self, email: &str, token: &str) -> Result<(), AppError> {
        self.record(Sent::Verification { email: email.into(), token: token.into() })
    }

    async fn send_email_change_confirmation(&self, email: &str, token: &str) -> Result<(), AppError> {
        self.record(Sent::EmailChange { email: email.into(), token: token.into() })
    }

    async fn send_password_reset_link(&self, user_id: Uuid, email: &str, token: &str) -> Result<(), AppError> {
        self.record(Sent::PasswordReset { user_id, email: email.into(), token: token.into() })
    }
}

pub struct TestContext {
    pub db: Arc<PostgresService>,
    pub mailbox: Arc<RecordingNotifier>,
    pub state: AppState,
}

impl TestContext {
    pub async fn new() -> TestContext {
        // one connection, so every query sees the same in-memory database
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Arc::new(
            PostgresService::with_options(options)
                .await
                .expect("Failed to initialize database")
        );
        let mailbox = Arc::new(RecordingNotifier::default());
        let jwt = JwtConfig { secret: "test_jwt_secret".to_string(), expires_in_secs: 3600 };
        let state = AppState::new(db.clone(), mailbox.clone(), &jwt, Duration::hours(24));

        TestContext { db, mailbox, state }
    }

    /// Registers and verifies `email` with [`PASSWORD`], returning the user id.
    pub async fn verified_user(&self, email: &str) -> Uuid {
        self.state.auth.register(email, PASSWORD).await.expect("register failed");
        let token = self.mailbox.last().token().to_string();
        self.state.auth.verify(&token).await.expect("verify failed").id
    }
}
