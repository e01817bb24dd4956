//! In-process store implementing both repositories.
//!
//! Behaves like the MongoDB repositories for everything the services rely
//! on: binary name ordering, case-insensitive name lookup, array membership
//! for `category`. Clones share the same data, so one store can back both
//! services.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, Item, ItemFields, ItemListEntry, ItemSummary};
use crate::repository::{CategoryRepository, ItemRepository};

#[derive(Default)]
struct Tables {
    categories: BTreeMap<Uuid, Category>,
    items: BTreeMap<Uuid, Item>,
}

#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    tables: Arc<Mutex<Tables>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the database were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Insert a category as-is, bypassing validation
    pub async fn insert_category(&self, category: Category) {
        self.tables
            .lock()
            .await
            .categories
            .insert(category.id, category);
    }

    /// Insert an item as-is, bypassing validation
    pub async fn insert_item(&self, item: Item) {
        self.tables.lock().await.items.insert(item.id, item);
    }

    pub async fn categories(&self) -> Vec<Category> {
        let tables = self.tables.lock().await;
        sorted_by_name(tables.categories.values().cloned().collect(), |c| &c.name)
    }

    pub async fn items(&self) -> Vec<Item> {
        let tables = self.tables.lock().await;
        sorted_by_name(tables.items.values().cloned().collect(), |i| &i.name)
    }

    fn check_available(&self) -> CatalogResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CatalogError::Database(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

fn sorted_by_name<T>(mut rows: Vec<T>, name: impl Fn(&T) -> &String) -> Vec<T> {
    rows.sort_by(|a, b| name(a).cmp(name(b)));
    rows
}

#[async_trait]
impl CategoryRepository for InMemoryCatalogStore {
    async fn create(&self, name: String) -> CatalogResult<Category> {
        self.check_available()?;
        let category = Category::new(name);
        self.insert_category(category.clone()).await;
        Ok(category)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        self.check_available()?;
        Ok(self.tables.lock().await.categories.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> CatalogResult<Option<Category>> {
        self.check_available()?;
        let wanted = name.to_lowercase();
        let found = self
            .categories()
            .await
            .into_iter()
            .find(|category| category.name.to_lowercase() == wanted);
        Ok(found)
    }

    async fn list(&self) -> CatalogResult<Vec<Category>> {
        self.check_available()?;
        Ok(self.categories().await)
    }

    async fn list_by_ids(&self, ids: Vec<Uuid>) -> CatalogResult<Vec<Category>> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        let found = ids
            .iter()
            .filter_map(|id| tables.categories.get(id).cloned())
            .collect();
        Ok(sorted_by_name(found, |c| &c.name))
    }

    async fn update(&self, id: Uuid, name: String) -> CatalogResult<Category> {
        self.check_available()?;
        let mut tables = self.tables.lock().await;
        let category = tables
            .categories
            .get_mut(&id)
            .ok_or(CatalogError::CategoryNotFound(id))?;
        category.name = name;
        Ok(category.clone())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        self.check_available()?;
        Ok(self.tables.lock().await.categories.remove(&id).is_some())
    }

    async fn count(&self) -> CatalogResult<u64> {
        self.check_available()?;
        Ok(self.tables.lock().await.categories.len() as u64)
    }
}

#[async_trait]
impl ItemRepository for InMemoryCatalogStore {
    async fn create(&self, fields: ItemFields) -> CatalogResult<Item> {
        self.check_available()?;
        let item = Item::new(fields);
        self.insert_item(item.clone()).await;
        Ok(item)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Item>> {
        self.check_available()?;
        Ok(self.tables.lock().await.items.get(&id).cloned())
    }

    async fn list_entries(&self) -> CatalogResult<Vec<ItemListEntry>> {
        self.check_available()?;
        Ok(self.items().await.iter().map(ItemListEntry::from).collect())
    }

    async fn list_by_category(&self, category_id: Uuid) -> CatalogResult<Vec<ItemSummary>> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        let items = tables
            .items
            .values()
            .filter(|item| item.category.contains(&category_id))
            .map(ItemSummary::from)
            .collect();
        Ok(items)
    }

    async fn update(&self, id: Uuid, fields: ItemFields) -> CatalogResult<Item> {
        self.check_available()?;
        let mut tables = self.tables.lock().await;
        let slot = tables
            .items
            .get_mut(&id)
            .ok_or(CatalogError::ItemNotFound(id))?;
        *slot = Item::with_id(id, fields);
        Ok(slot.clone())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        self.check_available()?;
        Ok(self.tables.lock().await.items.remove(&id).is_some())
    }

    async fn count(&self) -> CatalogResult<u64> {
        self.check_available()?;
        Ok(self.tables.lock().await.items.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn fields(name: &str, category: BTreeSet<Uuid>) -> ItemFields {
        ItemFields {
            name: name.into(),
            description: format!("{} description", name),
            price: 1.0,
            quantity: 1,
            category,
        }
    }

    #[tokio::test]
    async fn test_find_by_name_ignores_case() {
        let store = InMemoryCatalogStore::new();
        CategoryRepository::create(&store, "Dairy".into()).await.unwrap();

        let found = store.find_by_name("DAIRY").await.unwrap().unwrap();
        assert_eq!(found.name, "Dairy");
        assert!(store.find_by_name("Dairy products").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_sorts_by_binary_name_order() {
        let store = InMemoryCatalogStore::new();
        for name in ["fruit", "Vegetables", "Dairy"] {
            CategoryRepository::create(&store, name.into()).await.unwrap();
        }

        let names: Vec<_> = CategoryRepository::list(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Dairy", "Vegetables", "fruit"]);
    }

    #[tokio::test]
    async fn test_list_by_category_uses_membership() {
        let store = InMemoryCatalogStore::new();
        let produce = Uuid::now_v7();
        let other = Uuid::now_v7();
        ItemRepository::create(&store, fields("Carrot", BTreeSet::from([produce, other])))
            .await
            .unwrap();
        ItemRepository::create(&store, fields("Milk", BTreeSet::from([other])))
            .await
            .unwrap();

        let in_produce = store.list_by_category(produce).await.unwrap();
        assert_eq!(in_produce.len(), 1);
        assert_eq!(in_produce[0].name, "Carrot");
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let store = InMemoryCatalogStore::new();
        let id = Uuid::now_v7();
        let result = ItemRepository::update(&store, id, fields("Ghost", BTreeSet::new())).await;
        assert!(matches!(result, Err(CatalogError::ItemNotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let store = InMemoryCatalogStore::new();
        store.set_unavailable(true);
        assert!(matches!(
            CategoryRepository::count(&store).await,
            Err(CatalogError::Database(_))
        ));
        store.set_unavailable(false);
        assert_eq!(CategoryRepository::count(&store).await.unwrap(), 0);
    }
}
