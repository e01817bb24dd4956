use axum::middleware;
use axum_helpers::{create_production_app, create_router, health_router, render_error_pages};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_catalog::TemplateEngine;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    api::catalog::init_indexes(&db).await?;

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    let views = TemplateEngine::new()?;

    let app = create_router(api::routes(&state, views.clone()))
        .merge(health_router(state.config.app))
        .layer(middleware::from_fn_with_state(
            Arc::new(views),
            render_error_pages::<TemplateEngine>,
        ));

    info!("Starting grocery inventory with graceful shutdown (30s timeout)");

    let mongo_client = state.mongo_client.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            database::mongodb::shutdown(mongo_client).await;
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Grocery inventory shutdown complete");
    Ok(())
}
