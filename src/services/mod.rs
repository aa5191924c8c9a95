pub mod auth;
pub mod credentials;
pub mod notifications;
pub mod user;
pub mod verification;
