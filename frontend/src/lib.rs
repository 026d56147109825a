//! Account and profile screens for the finance frontend: custom categories
//! with drag reordering, password management, and the guarded bulk-deletion
//! flows.

pub mod api;
pub mod categories;
pub mod components;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod security;

pub use components::App;
