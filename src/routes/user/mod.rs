pub mod email_update;
pub mod get;
pub mod password_update;
