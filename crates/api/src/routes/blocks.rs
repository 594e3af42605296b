use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/blocks/:date", get(handlers::blocks::blocks_for_date))
        .route("/api/admin/blocks", post(handlers::blocks::create_blocks))
        .route("/api/admin/blocks", get(handlers::blocks::list_blocks))
        .route(
            "/api/admin/blocks/conflict-preview",
            get(handlers::blocks::conflict_preview),
        )
        .route(
            "/api/admin/blocks/instances/:block_id",
            put(handlers::blocks::update_block_instance),
        )
        .route("/api/admin/blocks/:batch_id", get(handlers::blocks::get_batch))
        .route(
            "/api/admin/blocks/:batch_id",
            put(handlers::blocks::update_batch),
        )
        .route(
            "/api/admin/blocks/:batch_id",
            delete(handlers::blocks::delete_batch),
        )
}
