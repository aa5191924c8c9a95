pub mod tab;
pub mod user;
pub mod user_email_verification;
pub mod work_session;

/*
 A user signs up unverified and receives a link carrying a verification token.
 Tokens live in user_email_verification keyed by the token itself and point back
 at an email address, not a user id, so an email change simply issues a new row.
 Work sessions hang off a user; tabs hang off a work session.
 */
