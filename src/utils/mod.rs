pub mod jwt;
pub mod mail;
pub mod token;
pub mod validation;
pub mod webutils;
