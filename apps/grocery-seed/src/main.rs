//! Grocery Seed
//!
//! One-shot tool that fills a MongoDB database with sample categories and
//! items for the grocery inventory.

use clap::Parser;
use core_config::Environment;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::{MongoConfig, connect_from_config, shutdown};
use domain_catalog::{MongoCategoryRepository, MongoItemRepository};
use eyre::Result;
use tracing::info;

mod seed;

#[derive(Parser)]
#[command(name = "grocery-seed")]
#[command(about = "Populate a grocery inventory database with sample categories and items")]
struct Cli {
    /// MongoDB connection string, e.g. mongodb://localhost:27017
    connection_string: String,

    /// Database to populate
    #[arg(short, long, default_value = "inventory")]
    database: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let cli = Cli::parse();

    let config = MongoConfig::with_database(cli.connection_string, cli.database)
        .with_app_name(env!("CARGO_PKG_NAME"));
    let client = connect_from_config(&config)
        .await
        .map_err(|e| eyre::eyre!("Database connection failed: {}", e))?;
    let db = client.database(config.database());

    let categories = MongoCategoryRepository::new(&db);
    let items = MongoItemRepository::new(&db);
    categories.init_indexes().await?;
    items.init_indexes().await?;

    let created = seed::create_categories(&categories).await?;
    let stocked = seed::create_items(&items, &created).await?;

    info!(
        "Seeding complete: {} categories, {} items",
        created.len(),
        stocked.len()
    );

    shutdown(client).await;
    Ok(())
}
