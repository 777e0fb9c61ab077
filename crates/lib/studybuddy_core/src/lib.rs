//! # studybuddy_core
//!
//! Core chat proxy logic for StudyBuddy.

pub mod chat;
pub mod completion;
pub mod config;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
