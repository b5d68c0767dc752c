use axum::Router;

use crate::state::AppState;

mod dto;
pub mod extractors;
mod handlers;
pub mod jwt;
mod password;
mod repo;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
