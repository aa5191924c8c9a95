use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One issued token. `purpose` keeps a password reset token from
/// verifying an address and the other way round.
#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_email_verification")]
pub struct Model {
    /// 64 hex chars.
    #[sea_orm(primary_key, auto_increment = false)]
    pub token: String,
    pub email: String,
    pub purpose: String,
    pub created_at: DateTimeUtc,
    pub expires_at: DateTimeUtc,
    /// Set once the token has been used.
    pub consumed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
