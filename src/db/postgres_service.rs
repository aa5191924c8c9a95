use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

/// Database handle shared by every request. Postgres in production; any
/// sea-orm URL works, the tests run it against in-memory SQLite.
#[derive(Clone)]
pub struct PostgresService {
    pub(crate) database_connection: DatabaseConnection,
}

impl PostgresService {
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(uri.to_owned());
        options.sqlx_logging(false);
        Self::with_options(options).await
    }

    /// Connects and brings the schema up to date.
    pub async fn with_options(options: ConnectOptions) -> Result<Self, DbErr> {
        info!("Connecting to database...");
        let database_connection = Database::connect(options).await?;
        info!("Running migrations...");
        Migrator::up(&database_connection, None).await?;
        info!("Migrations finished.");
        Ok(Self { database_connection })
    }
}
