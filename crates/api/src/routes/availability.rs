use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/availability",
            get(handlers::availability::get_availability),
        )
        .route("/api/staff", get(handlers::availability::staff_list))
}
