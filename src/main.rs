use actix_web::{middleware::Logger, App, HttpServer};
use chrono::{Duration, Utc};
use std::sync::Arc;
use timetrack_auth::config::EnvConfig;
use timetrack_auth::db::postgres_service::PostgresService;
use timetrack_auth::services::notifications::MailNotifier;
use timetrack_auth::state::AppState;
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    let addr = format!("0.0.0.0:{}", config.port);

    let postgres_service = Arc::new(
        PostgresService::new(&config.db_url)
            .await
            .map_err(|e| std::io::Error::other(format!("failed to initialize PostgresService: {e}")))?
    );

    match postgres_service.purge_verifications(Utc::now()).await {
        Ok(n) => info!("purged {n} spent or expired verification tokens"),
        Err(e) => warn!("token purge failed: {e}"),
    }

    let notifier = Arc::new(
        MailNotifier::from_config(&config.mail)
            .map_err(|e| std::io::Error::other(e.to_string()))?
    );
    info!("mail mode: {}", config.mail.mode);

    let state = AppState::new(
        postgres_service,
        notifier,
        &config.jwt,
        Duration::seconds(config.token_ttl_secs),
    );

    info!("Starting server on {}", addr);

    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(Logger::default())
            .configure(move |cfg| state.configure(cfg))
    })
    .bind(addr)?
    .run()
    .await
}
