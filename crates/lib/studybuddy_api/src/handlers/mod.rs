//! Request handlers.

pub mod chat;
pub mod client_config;
pub mod fallback;
