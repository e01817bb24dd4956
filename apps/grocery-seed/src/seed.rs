//! Sample inventory data.
//!
//! Categories and items are inserted concurrently; results come back in
//! table order so items can refer to categories by index.

use domain_catalog::{
    CatalogError, CatalogResult, Category, CategoryRepository, Item, ItemFields, ItemRepository,
};
use futures::future::try_join_all;
use std::collections::BTreeSet;
use tracing::info;

pub const CATEGORIES: [&str; 3] = ["Vegetables", "Dairy", "Fruit"];

pub struct SeedItem {
    pub name: &'static str,
    pub description: &'static str,
    pub price: f64,
    pub quantity: i64,
    /// Index into [`CATEGORIES`]
    pub category: usize,
}

pub const ITEMS: [SeedItem; 6] = [
    SeedItem {
        name: "Red Apple",
        description: "A pack of 6 Red Apples",
        price: 1.79,
        quantity: 20,
        category: 2,
    },
    SeedItem {
        name: "Green Apple",
        description: "A pack of 6 Green Apples",
        price: 1.99,
        quantity: 25,
        category: 2,
    },
    SeedItem {
        name: "Cucumber",
        description: "One plastic wrapped Cucumber",
        price: 1.09,
        quantity: 14,
        category: 0,
    },
    SeedItem {
        name: "Leicester Cheese",
        description: "450g block of Leicester Cheese",
        price: 3.79,
        quantity: 7,
        category: 1,
    },
    SeedItem {
        name: "Broccoli",
        description: "One large head of Broccoli",
        price: 1.29,
        quantity: 5,
        category: 0,
    },
    SeedItem {
        name: "Whole Milk",
        description: "2L Whole Milk",
        price: 1.45,
        quantity: 18,
        category: 1,
    },
];

pub async fn create_categories<C: CategoryRepository>(repo: &C) -> CatalogResult<Vec<Category>> {
    info!("Adding categories");
    try_join_all(CATEGORIES.iter().map(|name| async move {
        let category = repo.create(name.to_string()).await?;
        info!(id = %category.id, "Added category: {}", category.name);
        Ok::<_, CatalogError>(category)
    }))
    .await
}

/// `categories` must be in [`CATEGORIES`] order
pub async fn create_items<I: ItemRepository>(
    repo: &I,
    categories: &[Category],
) -> CatalogResult<Vec<Item>> {
    info!("Adding items");
    try_join_all(ITEMS.iter().map(|seed| async move {
        let category: BTreeSet<_> = categories
            .get(seed.category)
            .map(|c| c.id)
            .into_iter()
            .collect();
        let item = repo
            .create(ItemFields {
                name: seed.name.to_string(),
                description: seed.description.to_string(),
                price: seed.price,
                quantity: seed.quantity,
                category,
            })
            .await?;
        info!(id = %item.id, "Added item: {}", item.name);
        Ok::<_, CatalogError>(item)
    }))
    .await
}
