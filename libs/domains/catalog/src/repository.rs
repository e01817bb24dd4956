use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{Category, Item, ItemFields, ItemListEntry, ItemSummary};

/// Repository trait for Category persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Persist a new category
    async fn create(&self, name: String) -> CatalogResult<Category>;

    /// Get a category by ID
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>>;

    /// Find a category whose name matches ignoring case
    async fn find_by_name(&self, name: &str) -> CatalogResult<Option<Category>>;

    /// All categories sorted by name ascending
    async fn list(&self) -> CatalogResult<Vec<Category>>;

    /// Categories with the given ids, sorted by name; unknown ids are skipped
    async fn list_by_ids(&self, ids: Vec<Uuid>) -> CatalogResult<Vec<Category>>;

    /// Replace the name of an existing category
    async fn update(&self, id: Uuid, name: String) -> CatalogResult<Category>;

    /// Delete a category; `false` when nothing matched
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;

    /// Number of stored categories
    async fn count(&self) -> CatalogResult<u64>;
}

/// Repository trait for Item persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persist a new item
    async fn create(&self, fields: ItemFields) -> CatalogResult<Item>;

    /// Get an item by ID
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Item>>;

    /// All items projected to name and quantity, sorted by name
    async fn list_entries(&self) -> CatalogResult<Vec<ItemListEntry>>;

    /// Items referencing a category, projected to name and description
    async fn list_by_category(&self, category_id: Uuid) -> CatalogResult<Vec<ItemSummary>>;

    /// Replace every field of an existing item
    async fn update(&self, id: Uuid, fields: ItemFields) -> CatalogResult<Item>;

    /// Delete an item; `false` when nothing matched
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;

    /// Number of stored items
    async fn count(&self) -> CatalogResult<u64>;
}
