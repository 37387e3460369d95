mod dto;
mod handlers;
pub mod memory;
pub mod repo;
mod repo_types;
mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().nest("/user", handlers::user_routes())
}
