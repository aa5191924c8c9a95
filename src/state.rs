use std::sync::Arc;

use actix_web::web;
use chrono::Duration;

use crate::config::JwtConfig;
use crate::db::postgres_service::PostgresService;
use crate::routes::configure_routes;
use crate::services::{
    auth::AuthService, notifications::Notifier, user::UserService, verification::TokenIssuer,
};
use crate::utils::jwt::SessionSigner;
use crate::utils::webutils::{json_error, path_error, query_error};

/// Everything a request handler can reach, wired once at startup.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PostgresService>,
    pub tokens: Arc<TokenIssuer>,
    pub users: Arc<UserService>,
    pub auth: Arc<AuthService>,
    pub sessions: SessionSigner,
}

impl AppState {
    pub fn new(db: Arc<PostgresService>, notifier: Arc<dyn Notifier>, jwt: &JwtConfig, token_ttl: Duration) -> Self {
        let sessions = SessionSigner::new(&jwt.secret, jwt.expires_in_secs);
        let tokens = Arc::new(TokenIssuer::new(db.clone(), token_ttl));
        let users = Arc::new(UserService::new(db.clone(), tokens.clone(), notifier.clone()));
        let auth = Arc::new(AuthService::new(users.clone(), tokens.clone(), notifier, sessions.clone()));

        Self { db, tokens, users, auth, sessions }
    }

    /// Registers app data and routes on an `App` / `ServiceConfig`.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(Arc::clone(&self.db)))
            .app_data(web::Data::new(Arc::clone(&self.users)))
            .app_data(web::Data::new(Arc::clone(&self.auth)))
            .app_data(web::Data::new(self.sessions.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .app_data(web::QueryConfig::default().error_handler(query_error))
            .app_data(web::PathConfig::default().error_handler(path_error));
        configure_routes(cfg);
    }
}
