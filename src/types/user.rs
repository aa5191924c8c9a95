use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of register and login.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginRes {
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct REmailUpdate {
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RPasswordUpdate {
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RPasswordResetRequest {
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RPasswordReset {
    pub token: String,
    pub password: String,
}

/// Partial update applied by the credential store. `None` leaves a column alone.
#[derive(Debug, Default, Clone)]
pub struct UserPatch {
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_verified: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct UserRes {
    pub id: Uuid,
    pub email: String,
    pub is_verified: bool,
}

impl From<entity::user::Model> for UserRes {
    fn from(u: entity::user::Model) -> Self {
        Self { id: u.id, email: u.email, is_verified: u.is_verified }
    }
}
