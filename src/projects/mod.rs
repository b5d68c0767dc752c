use axum::Router;

use crate::state::AppState;

mod dto;
mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
