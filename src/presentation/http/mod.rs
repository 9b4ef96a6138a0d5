//! HTTP surface for the alert service.
//!
//! `POST /alerts`, `GET /alerts`, and `GET|PATCH|PUT|DELETE /alerts/{id}`.
//! Mutations take `name` and `enabled` from the query string or an urlencoded
//! body and answer in plain text; reads answer in JSON.

pub mod error;
pub mod handlers;
pub mod params;
pub mod principal;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::application::services::alert::AlertService;

use self::principal::PrincipalResolver;

/// Shared state for handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AlertService>,
    pub resolver: Arc<dyn PrincipalResolver>,
}

impl AppState {
    #[must_use]
    pub fn new(service: Arc<AlertService>, resolver: Arc<dyn PrincipalResolver>) -> Self {
        Self { service, resolver }
    }
}

/// Build the alert router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/alerts",
            get(handlers::list_alerts).post(handlers::create_alert),
        )
        .route(
            "/alerts/{id}",
            get(handlers::get_alert)
                .patch(handlers::update_alert)
                .put(handlers::update_alert)
                .delete(handlers::delete_alert),
        )
        .with_state(state)
}
