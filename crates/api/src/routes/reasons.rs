use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/admin/block-reasons",
            get(handlers::reasons::list_block_reasons),
        )
        .route(
            "/api/admin/block-reasons",
            post(handlers::reasons::create_block_reason),
        )
        .route(
            "/api/admin/block-reasons/:reason_id",
            put(handlers::reasons::update_block_reason),
        )
}
