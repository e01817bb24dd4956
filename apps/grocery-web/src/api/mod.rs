//! Route wiring for the grocery web app.

pub mod catalog;
pub mod health;

use axum::Router;
use domain_catalog::TemplateEngine;

use crate::state::AppState;

/// All application routes, with state applied
pub fn routes(state: &AppState, views: TemplateEngine) -> Router {
    Router::new()
        .merge(catalog::router(state, views))
        .merge(health::router(state.clone()))
}
