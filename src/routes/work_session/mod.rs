pub mod create;
pub mod get;
pub mod tab;
pub mod update;
