use axum::Router;

use crate::state::AppState;
use crate::{assistant, sessions, storefront};

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(storefront::router())
        .merge(sessions::router())
        .merge(assistant::router())
        .with_state(state)
}
