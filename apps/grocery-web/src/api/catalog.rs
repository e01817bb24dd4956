//! Catalog pages backed by MongoDB.

use axum::Router;
use domain_catalog::{
    CatalogState, MongoCategoryRepository, MongoItemRepository, TemplateEngine, handlers,
};
use mongodb::Database;
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState, views: TemplateEngine) -> Router {
    let catalog = CatalogState::new(
        MongoCategoryRepository::new(&state.db),
        MongoItemRepository::new(&state.db),
        views,
    );

    handlers::router(catalog)
}

/// Create the catalog collection indexes
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoCategoryRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create category indexes: {}", e))?;

    MongoItemRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create item indexes: {}", e))?;

    info!("Catalog collection indexes created");
    Ok(())
}
