//! MongoDB implementations of CategoryRepository and ItemRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Binary, Bson, Document, doc, spec::BinarySubtype},
    options::{Collation, CollationStrength, IndexOptions},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, Item, ItemFields, ItemListEntry, ItemSummary};
use crate::repository::{CategoryRepository, ItemRepository};

pub const CATEGORIES_COLLECTION: &str = "categories";
pub const ITEMS_COLLECTION: &str = "items";

/// Ids as the driver stores them: `insert_one` serializes `Uuid` in
/// non-human-readable form, which is 16 bytes of generic binary.
fn id_bson(id: &Uuid) -> Bson {
    Bson::Binary(Binary {
        subtype: BinarySubtype::Generic,
        bytes: id.as_bytes().to_vec(),
    })
}

fn id_filter(id: Uuid) -> Document {
    doc! { "_id": id_bson(&id) }
}

/// English, strength 2: compares letters and accents, ignores case
fn name_collation() -> Collation {
    Collation::builder()
        .locale("en")
        .strength(CollationStrength::Secondary)
        .build()
}

/// MongoDB implementation of the CategoryRepository
pub struct MongoCategoryRepository {
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    /// Create a repository over the `categories` collection
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoCategoryRepository::new(&client.database("inventory"));
    /// ```
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, CATEGORIES_COLLECTION)
    }

    /// Create a repository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Category>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Category> {
        &self.collection
    }

    /// Create the name lookup index.
    ///
    /// The index shares the lookup collation but is not unique, so the first
    /// writer's casing is what gets stored.
    pub async fn init_indexes(&self) -> CatalogResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(
                    IndexOptions::builder()
                        .collation(name_collation())
                        .name("idx_name_ci".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!(collection = %self.collection.name(), "Indexes initialized");
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self))]
    async fn create(&self, name: String) -> CatalogResult<Category> {
        let category = Category::new(name);

        self.collection.insert_one(&category).await?;

        tracing::info!(category_id = %category.id, "Category created successfully");
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        let category = self.collection.find_one(id_filter(id)).await?;
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> CatalogResult<Option<Category>> {
        let category = self
            .collection
            .find_one(doc! { "name": name })
            .collation(name_collation())
            .await?;
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> CatalogResult<Vec<Category>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "name": 1 })
            .await?;
        let categories: Vec<Category> = cursor.try_collect().await?;
        Ok(categories)
    }

    #[instrument(skip(self))]
    async fn list_by_ids(&self, ids: Vec<Uuid>) -> CatalogResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Bson> = ids.iter().map(id_bson).collect();
        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": ids } })
            .sort(doc! { "name": 1 })
            .await?;
        let categories: Vec<Category> = cursor.try_collect().await?;
        Ok(categories)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: Uuid, name: String) -> CatalogResult<Category> {
        let category = Category { id, name };

        let result = self
            .collection
            .replace_one(id_filter(id), &category)
            .await?;
        if result.matched_count == 0 {
            return Err(CatalogError::CategoryNotFound(id));
        }

        tracing::info!(category_id = %id, "Category updated successfully");
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;

        let deleted = result.deleted_count > 0;
        if deleted {
            tracing::info!(category_id = %id, "Category deleted successfully");
        }
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> CatalogResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }
}

/// MongoDB implementation of the ItemRepository
pub struct MongoItemRepository {
    collection: Collection<Item>,
}

impl MongoItemRepository {
    /// Create a repository over the `items` collection
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, ITEMS_COLLECTION)
    }

    /// Create a repository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Item>(collection_name);
        Self { collection }
    }

    pub fn collection(&self) -> &Collection<Item> {
        &self.collection
    }

    /// Create indexes for the dependents lookup and the sorted list
    pub async fn init_indexes(&self) -> CatalogResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "category": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(IndexOptions::builder().name("idx_name".to_string()).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!(collection = %self.collection.name(), "Indexes initialized");
        Ok(())
    }

    /// Filter matching items whose `category` array contains `category_id`
    fn category_filter(category_id: Uuid) -> Document {
        doc! { "category": id_bson(&category_id) }
    }
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    #[instrument(skip(self, fields), fields(item_name = %fields.name))]
    async fn create(&self, fields: ItemFields) -> CatalogResult<Item> {
        let item = Item::new(fields);

        self.collection.insert_one(&item).await?;

        tracing::info!(item_id = %item.id, "Item created successfully");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Item>> {
        let item = self.collection.find_one(id_filter(id)).await?;
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn list_entries(&self) -> CatalogResult<Vec<ItemListEntry>> {
        let cursor = self
            .collection
            .clone_with_type::<ItemListEntry>()
            .find(doc! {})
            .projection(doc! { "name": 1, "quantity": 1 })
            .sort(doc! { "name": 1 })
            .await?;
        let entries: Vec<ItemListEntry> = cursor.try_collect().await?;
        Ok(entries)
    }

    #[instrument(skip(self))]
    async fn list_by_category(&self, category_id: Uuid) -> CatalogResult<Vec<ItemSummary>> {
        let cursor = self
            .collection
            .clone_with_type::<ItemSummary>()
            .find(Self::category_filter(category_id))
            .projection(doc! { "name": 1, "description": 1 })
            .await?;
        let items: Vec<ItemSummary> = cursor.try_collect().await?;
        Ok(items)
    }

    #[instrument(skip(self, fields))]
    async fn update(&self, id: Uuid, fields: ItemFields) -> CatalogResult<Item> {
        let item = Item::with_id(id, fields);

        let result = self.collection.replace_one(id_filter(id), &item).await?;
        if result.matched_count == 0 {
            return Err(CatalogError::ItemNotFound(id));
        }

        tracing::info!(item_id = %id, "Item updated successfully");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;

        let deleted = result.deleted_count > 0;
        if deleted {
            tracing::info!(item_id = %id, "Item deleted successfully");
        }
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> CatalogResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }
}
