//! Router construction for the check-ip service.

use std::path::Path;

use axum::{routing::get, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, AppState};

/// Build the router. `/static` is only mounted when `static_dir` is given.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut router = Router::new()
        .route("/check-ip", get(handlers::check_ip))
        .route("/health", get(handlers::health));

    if let Some(dir) = static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router.with_state(state).layer(TraceLayer::new_for_http())
}
