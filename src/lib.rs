//! Maintrack server
//!
//! REST JSON API for industrial maintenance tracking: equipment and drives,
//! breakdown reports, maintenance checklists, daily diaries with signed
//! approval, internal messaging and generated maintenance tasks.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod maintenance;
pub mod models;
pub mod repository;
pub mod services;

pub use api::create_router;
pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
