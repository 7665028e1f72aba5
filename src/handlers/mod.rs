//! handlers/mod.rs
pub mod record_handler;
pub mod root_handler;
