//! Catalog services - business logic layer
//!
//! Both services share the two repositories: category pages list dependent
//! items, and item forms list every category.

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    CatalogCounts, Category, CategoryDeletion, CategoryDetail, CategoryForm, CategoryFormState,
    CategoryOption, FieldError, Item, ItemDetail, ItemFormState, ItemInput, ItemListEntry,
    Submission,
};
use crate::repository::{CategoryRepository, ItemRepository};

/// Category service: validation, duplicate detection and delete guarding
pub struct CategoryService<C: CategoryRepository, I: ItemRepository> {
    categories: Arc<C>,
    items: Arc<I>,
}

impl<C: CategoryRepository, I: ItemRepository> CategoryService<C, I> {
    pub fn new(categories: Arc<C>, items: Arc<I>) -> Self {
        Self { categories, items }
    }

    /// All categories sorted by name
    #[instrument(skip(self))]
    pub async fn list(&self) -> CatalogResult<Vec<Category>> {
        self.categories.list().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> CatalogResult<Category> {
        self.categories
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    /// A category and the items that reference it
    #[instrument(skip(self))]
    pub async fn get_with_items(&self, id: Uuid) -> CatalogResult<CategoryDetail> {
        self.delete_preview(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    /// What the delete confirmation page shows; `None` when the category is gone
    #[instrument(skip(self))]
    pub async fn delete_preview(&self, id: Uuid) -> CatalogResult<Option<CategoryDetail>> {
        let (category, items) = tokio::try_join!(
            self.categories.get_by_id(id),
            self.items.list_by_category(id)
        )?;

        Ok(category.map(|category| CategoryDetail { category, items }))
    }

    /// Prefilled update form
    #[instrument(skip(self))]
    pub async fn edit_form(&self, id: Uuid) -> CatalogResult<CategoryFormState> {
        let category = self.get(id).await?;
        Ok(CategoryFormState {
            name: category.name,
            errors: Vec::new(),
        })
    }

    /// Create a category unless one with the same name (ignoring case) exists.
    ///
    /// An existing match is returned as accepted; the submitted casing is dropped.
    #[instrument(skip(self, form))]
    pub async fn create(
        &self,
        form: CategoryForm,
    ) -> CatalogResult<Submission<Category, CategoryFormState>> {
        let form = form.trimmed();
        if let Err(errors) = form.validate() {
            return Ok(Submission::Rejected(CategoryFormState {
                name: form.name,
                errors: FieldError::from_validation(&errors),
            }));
        }

        // Read-then-insert: two concurrent creates can both miss here.
        if let Some(existing) = self.categories.find_by_name(&form.name).await? {
            tracing::debug!(category_id = %existing.id, "Category already exists");
            return Ok(Submission::Accepted(existing));
        }

        let category = self.categories.create(form.name).await?;
        Ok(Submission::Accepted(category))
    }

    /// Rename a category, keeping its id
    #[instrument(skip(self, form))]
    pub async fn update(
        &self,
        id: Uuid,
        form: CategoryForm,
    ) -> CatalogResult<Submission<Category, CategoryFormState>> {
        let form = form.trimmed();
        if let Err(errors) = form.validate() {
            return Ok(Submission::Rejected(CategoryFormState {
                name: form.name,
                errors: FieldError::from_validation(&errors),
            }));
        }

        let category = self.categories.update(id, form.name).await?;
        Ok(Submission::Accepted(category))
    }

    /// Delete a category that no item references.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> CatalogResult<CategoryDeletion> {
        let Some(detail) = self.delete_preview(id).await? else {
            return Ok(CategoryDeletion::Missing);
        };

        if !detail.items.is_empty() {
            tracing::info!(
                category_id = %id,
                dependents = detail.items.len(),
                "Category delete refused"
            );
            return Ok(CategoryDeletion::Refused(detail));
        }

        // Read-then-delete: an item added in between is left dangling.
        if self.categories.delete(id).await? {
            Ok(CategoryDeletion::Deleted)
        } else {
            Ok(CategoryDeletion::Missing)
        }
    }
}

impl<C: CategoryRepository, I: ItemRepository> Clone for CategoryService<C, I> {
    fn clone(&self) -> Self {
        Self {
            categories: Arc::clone(&self.categories),
            items: Arc::clone(&self.items),
        }
    }
}

/// Item service: form normalization, validation and reference joins
pub struct ItemService<C: CategoryRepository, I: ItemRepository> {
    categories: Arc<C>,
    items: Arc<I>,
}

impl<C: CategoryRepository, I: ItemRepository> ItemService<C, I> {
    pub fn new(categories: Arc<C>, items: Arc<I>) -> Self {
        Self { categories, items }
    }

    /// Item and category totals for the dashboard
    #[instrument(skip(self))]
    pub async fn counts(&self) -> CatalogResult<CatalogCounts> {
        let (items, categories) = tokio::try_join!(self.items.count(), self.categories.count())?;
        Ok(CatalogCounts { items, categories })
    }

    /// All items as name and quantity, sorted by name
    #[instrument(skip(self))]
    pub async fn summary_list(&self) -> CatalogResult<Vec<ItemListEntry>> {
        self.items.list_entries().await
    }

    /// An item with its categories resolved
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> CatalogResult<ItemDetail> {
        self.delete_preview(id)
            .await?
            .ok_or(CatalogError::ItemNotFound(id))
    }

    /// What the delete confirmation page shows; `None` when the item is gone
    #[instrument(skip(self))]
    pub async fn delete_preview(&self, id: Uuid) -> CatalogResult<Option<ItemDetail>> {
        let Some(item) = self.items.get_by_id(id).await? else {
            return Ok(None);
        };

        let categories = self
            .categories
            .list_by_ids(item.category.iter().copied().collect())
            .await?;
        Ok(Some(ItemDetail { item, categories }))
    }

    /// Empty create form listing every category unchecked
    #[instrument(skip(self))]
    pub async fn blank_form(&self) -> CatalogResult<ItemFormState> {
        let categories = self.categories.list().await?;
        Ok(ItemFormState {
            categories: CategoryOption::mark(categories, &Default::default()),
            ..Default::default()
        })
    }

    /// Update form with the item's categories checked
    #[instrument(skip(self))]
    pub async fn edit_form(&self, id: Uuid) -> CatalogResult<ItemFormState> {
        let (item, categories) =
            tokio::try_join!(self.items.get_by_id(id), self.categories.list())?;
        let item = item.ok_or(CatalogError::ItemNotFound(id))?;

        Ok(ItemFormState {
            categories: CategoryOption::mark(categories, &item.category),
            input: ItemInput::from_item(&item),
            errors: Vec::new(),
        })
    }

    #[instrument(skip(self, input), fields(item_name = %input.name))]
    pub async fn create(&self, input: ItemInput) -> CatalogResult<Submission<Item, ItemFormState>> {
        match input.parse() {
            Ok(fields) => Ok(Submission::Accepted(self.items.create(fields).await?)),
            Err(errors) => self.reject(input, errors).await,
        }
    }

    /// Replace every field of an item; categories left unchecked are removed
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: Uuid,
        input: ItemInput,
    ) -> CatalogResult<Submission<Item, ItemFormState>> {
        match input.parse() {
            Ok(fields) => Ok(Submission::Accepted(self.items.update(id, fields).await?)),
            Err(errors) => self.reject(input, errors).await,
        }
    }

    /// Delete an item; a missing id is not an error
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> CatalogResult<()> {
        if !self.items.delete(id).await? {
            tracing::debug!(item_id = %id, "Item already gone");
        }
        Ok(())
    }

    /// Hand the submission back with every category listed and its picks checked
    async fn reject(
        &self,
        input: ItemInput,
        errors: Vec<FieldError>,
    ) -> CatalogResult<Submission<Item, ItemFormState>> {
        let categories = self.categories.list().await?;
        Ok(Submission::Rejected(ItemFormState {
            categories: CategoryOption::mark(categories, &input.selected_ids()),
            input,
            errors,
        }))
    }
}

impl<C: CategoryRepository, I: ItemRepository> Clone for ItemService<C, I> {
    fn clone(&self) -> Self {
        Self {
            categories: Arc::clone(&self.categories),
            items: Arc::clone(&self.items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemFields, ItemSummary};
    use crate::repository::{MockCategoryRepository, MockItemRepository};
    use mockall::predicate::eq;
    use std::collections::BTreeSet;

    fn category_service(
        categories: MockCategoryRepository,
        items: MockItemRepository,
    ) -> CategoryService<MockCategoryRepository, MockItemRepository> {
        CategoryService::new(Arc::new(categories), Arc::new(items))
    }

    fn item_service(
        categories: MockCategoryRepository,
        items: MockItemRepository,
    ) -> ItemService<MockCategoryRepository, MockItemRepository> {
        ItemService::new(Arc::new(categories), Arc::new(items))
    }

    fn carrot(category: BTreeSet<Uuid>) -> Item {
        Item::new(ItemFields {
            name: "Carrot".into(),
            description: "A bag of carrots".into(),
            price: 0.89,
            quantity: 12,
            category,
        })
    }

    #[tokio::test]
    async fn test_create_category_returns_existing_match() {
        let existing = Category::new("Dairy");
        let returned = existing.clone();

        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_by_name()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        categories.expect_create().never();

        let service = category_service(categories, MockItemRepository::new());
        let outcome = service.create(CategoryForm::new("dairy")).await.unwrap();

        assert_eq!(outcome, Submission::Accepted(existing));
    }

    #[tokio::test]
    async fn test_create_category_persists_trimmed_name() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_find_by_name().returning(|_| Ok(None));
        categories
            .expect_create()
            .with(eq("Bakery".to_string()))
            .times(1)
            .returning(|name| Ok(Category::new(name)));

        let service = category_service(categories, MockItemRepository::new());
        let outcome = service.create(CategoryForm::new("  Bakery ")).await.unwrap();

        assert!(matches!(outcome, Submission::Accepted(c) if c.name == "Bakery"));
    }

    #[tokio::test]
    async fn test_create_category_rejects_short_name_without_store_access() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_find_by_name().never();
        categories.expect_create().never();

        let service = category_service(categories, MockItemRepository::new());
        let outcome = service.create(CategoryForm::new("ab")).await.unwrap();

        let Submission::Rejected(state) = outcome else {
            panic!("short name should be rejected");
        };
        assert_eq!(state.name, "ab");
        assert_eq!(
            state.errors[0].message,
            "Category name must contain at least 3 characters"
        );
    }

    #[tokio::test]
    async fn test_update_missing_category_is_not_found() {
        let id = Uuid::now_v7();
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_update()
            .with(eq(id), eq("Produce".to_string()))
            .returning(move |_, _| Err(CatalogError::CategoryNotFound(id)));

        let service = category_service(categories, MockItemRepository::new());
        let result = service.update(id, CategoryForm::new("Produce")).await;

        assert!(matches!(result, Err(CatalogError::CategoryNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_category_with_dependents_is_refused() {
        let produce = Category::new("Produce");
        let id = produce.id;
        let item = carrot(BTreeSet::from([id]));
        let summary = ItemSummary::from(&item);

        let mut categories = MockCategoryRepository::new();
        categories
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(produce.clone())));
        categories.expect_delete().never();

        let mut items = MockItemRepository::new();
        items
            .expect_list_by_category()
            .with(eq(id))
            .returning(move |_| Ok(vec![summary.clone()]));

        let service = category_service(categories, items);
        let outcome = service.delete(id).await.unwrap();

        let CategoryDeletion::Refused(detail) = outcome else {
            panic!("delete should be refused");
        };
        assert_eq!(detail.items[0].name, "Carrot");
    }

    #[tokio::test]
    async fn test_delete_missing_category_is_noop() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_get_by_id().returning(|_| Ok(None));
        categories.expect_delete().never();

        let mut items = MockItemRepository::new();
        items.expect_list_by_category().returning(|_| Ok(vec![]));

        let service = category_service(categories, items);
        let outcome = service.delete(Uuid::now_v7()).await.unwrap();

        assert_eq!(outcome, CategoryDeletion::Missing);
    }

    #[tokio::test]
    async fn test_delete_unreferenced_category() {
        let bakery = Category::new("Bakery");
        let id = bakery.id;

        let mut categories = MockCategoryRepository::new();
        categories
            .expect_get_by_id()
            .returning(move |_| Ok(Some(bakery.clone())));
        categories
            .expect_delete()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(true));

        let mut items = MockItemRepository::new();
        items.expect_list_by_category().returning(|_| Ok(vec![]));

        let service = category_service(categories, items);
        assert_eq!(service.delete(id).await.unwrap(), CategoryDeletion::Deleted);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_list()
            .returning(|| Err(CatalogError::Database("connection refused".into())));

        let service = category_service(categories, MockItemRepository::new());
        assert!(matches!(
            service.list().await,
            Err(CatalogError::Database(_))
        ));
    }

    #[tokio::test]
    async fn test_rejected_item_keeps_checked_categories() {
        let fruit = Category::new("Fruit");
        let dairy = Category::new("Dairy");
        let listed = vec![dairy.clone(), fruit.clone()];

        let mut categories = MockCategoryRepository::new();
        categories
            .expect_list()
            .times(1)
            .returning(move || Ok(listed.clone()));

        let mut items = MockItemRepository::new();
        items.expect_create().never();

        let input = ItemInput {
            name: String::new(),
            description: "Crunchy".into(),
            price: "0.50".into(),
            quantity: "3".into(),
            category: BTreeSet::from([fruit.id.to_string()]),
        };

        let service = item_service(categories, items);
        let Submission::Rejected(state) = service.create(input).await.unwrap() else {
            panic!("empty name should be rejected");
        };

        assert_eq!(state.errors.len(), 1);
        assert_eq!(state.errors[0].field, "name");
        assert_eq!(state.categories.len(), 2);
        assert!(!state.categories[0].checked);
        assert!(state.categories[1].checked);
        assert_eq!(state.input.description, "Crunchy");
    }

    #[tokio::test]
    async fn test_create_item_persists_parsed_fields() {
        let fruit = Uuid::now_v7();

        let mut items = MockItemRepository::new();
        items
            .expect_create()
            .withf(move |fields: &ItemFields| {
                fields.price == 1.79 && fields.quantity == 20 && fields.category.contains(&fruit)
            })
            .times(1)
            .returning(|fields| Ok(Item::new(fields)));

        let input = ItemInput {
            name: "Red Apple".into(),
            description: "A pack of 6 Red Apples".into(),
            price: "1.79".into(),
            quantity: "20".into(),
            category: BTreeSet::from([fruit.to_string()]),
        };

        let service = item_service(MockCategoryRepository::new(), items);
        let outcome = service.create(input).await.unwrap();
        assert!(matches!(outcome, Submission::Accepted(item) if item.name == "Red Apple"));
    }

    #[tokio::test]
    async fn test_get_item_resolves_categories() {
        let fruit = Category::new("Fruit");
        let item = carrot(BTreeSet::from([fruit.id]));
        let id = item.id;
        let fruit_id = fruit.id;

        let mut items = MockItemRepository::new();
        items
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(item.clone())));

        let mut categories = MockCategoryRepository::new();
        categories
            .expect_list_by_ids()
            .with(eq(vec![fruit_id]))
            .returning(move |_| Ok(vec![fruit.clone()]));

        let service = item_service(categories, items);
        let detail = service.get(id).await.unwrap();
        assert_eq!(detail.categories[0].name, "Fruit");
    }

    #[tokio::test]
    async fn test_get_missing_item_is_not_found() {
        let mut items = MockItemRepository::new();
        items.expect_get_by_id().returning(|_| Ok(None));

        let service = item_service(MockCategoryRepository::new(), items);
        assert!(matches!(
            service.get(Uuid::now_v7()).await,
            Err(CatalogError::ItemNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_edit_form_checks_item_categories() {
        let fruit = Category::new("Fruit");
        let dairy = Category::new("Dairy");
        let item = carrot(BTreeSet::from([fruit.id]));
        let id = item.id;
        let listed = vec![dairy, fruit];

        let mut items = MockItemRepository::new();
        items
            .expect_get_by_id()
            .returning(move |_| Ok(Some(item.clone())));
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_list()
            .returning(move || Ok(listed.clone()));

        let service = item_service(categories, items);
        let state = service.edit_form(id).await.unwrap();

        assert_eq!(state.input.name, "Carrot");
        assert_eq!(state.input.quantity, "12");
        let checked: Vec<_> = state
            .categories
            .iter()
            .filter(|c| c.checked)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(checked, vec!["Fruit"]);
    }

    #[tokio::test]
    async fn test_delete_missing_item_is_ok() {
        let mut items = MockItemRepository::new();
        items.expect_delete().times(1).returning(|_| Ok(false));

        let service = item_service(MockCategoryRepository::new(), items);
        assert!(service.delete(Uuid::now_v7()).await.is_ok());
    }

    #[tokio::test]
    async fn test_counts_reads_both_collections() {
        let mut items = MockItemRepository::new();
        items.expect_count().returning(|| Ok(6));
        let mut categories = MockCategoryRepository::new();
        categories.expect_count().returning(|| Ok(3));

        let service = item_service(categories, items);
        let counts = service.counts().await.unwrap();
        assert_eq!(counts, CatalogCounts { items: 6, categories: 3 });
    }
}
