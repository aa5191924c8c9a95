pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_user_table;
mod m20240301_000002_create_user_email_verification_table;
mod m20240315_000003_create_work_session_and_tab_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_user_table::Migration),
            Box::new(m20240301_000002_create_user_email_verification_table::Migration),
            Box::new(m20240315_000003_create_work_session_and_tab_tables::Migration),
        ]
    }
}
