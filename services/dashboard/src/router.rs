use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use tvlink_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    activate::{activate, scan},
    cookies::{activate_cookies, delete_cookies, list_cookies, upload_cookies, validate_cookies},
    health::{healthz, readyz},
    history::get_history,
    session::{get_session, get_status},
};
use crate::identity::visitor_session;
use crate::state::AppState;

/// Camera frames and cookie exports arrive as JSON bodies.
const BODY_LIMIT: usize = 16 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Session
        .route("/user/session", get(get_session))
        .route("/status", get(get_status))
        // Activation
        .route("/activate", post(activate))
        .route("/scan", post(scan))
        // Cookie sets
        .route(
            "/cookies",
            get(list_cookies).post(upload_cookies).delete(delete_cookies),
        )
        .route("/cookies/activate", get(activate_cookies))
        .route("/cookies/validate", get(validate_cookies))
        // History
        .route("/history", get(get_history))
        .route_layer(from_fn_with_state(state.clone(), visitor_session));

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
