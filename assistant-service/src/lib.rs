pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AssistantConfig;
use crate::services::{providers::TextProvider, JwtService, RecordStore};

/// Shared application state, constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: AssistantConfig,
    pub db: Arc<dyn RecordStore>,
    pub jwt: JwtService,
    pub text_provider: Arc<dyn TextProvider>,
}

/// Build the HTTP router. Role gating is applied per route group, before
/// the handler runs, so rejected requests never touch the database or the
/// text provider.
pub fn build_router(state: AppState) -> Router {
    let student_routes = Router::new()
        .route("/ask_question", post(handlers::assistant::ask_question))
        .route("/leaverelated", post(handlers::assistant::leave_related))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::auth::student_auth,
        ));

    let doctor_routes = Router::new()
        .route("/doctor_insights", post(handlers::assistant::doctor_insights))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::auth::doctor_auth,
        ));

    Router::new()
        .route("/", get(handlers::assistant::index))
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route(
            "/disease_prediction",
            post(handlers::assistant::disease_prediction),
        )
        .merge(student_routes)
        .merge(doctor_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
