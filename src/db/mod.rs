pub mod email_verification;
pub mod postgres_service;
pub mod tab;
pub mod user;
pub mod work_session;
