pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod services;
pub mod state;

use axum::Router;

use crate::config::AppConfig;
use crate::state::AppState;

pub fn build_router(state: AppState, config: &AppConfig) -> Router {
    api::router(state, config)
}
