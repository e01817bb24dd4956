use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::Form;
use axum_helpers::UuidPath;
use std::sync::Arc;

use crate::error::CatalogResult;
use crate::models::{
    CategoryDeletion, CategoryForm, CategoryFormState, ItemForm, ItemInput, Submission,
};
use crate::repository::{CategoryRepository, ItemRepository};
use crate::service::{CategoryService, ItemService};
use crate::views::TemplateEngine;

pub const CATALOG_HOME: &str = "/catalog";
pub const CATEGORY_LIST_URL: &str = "/catalog/categories";
pub const ITEM_LIST_URL: &str = "/catalog/items";

/// Everything the catalog handlers need, shared across requests
pub struct CatalogState<C: CategoryRepository, I: ItemRepository> {
    pub categories: CategoryService<C, I>,
    pub items: ItemService<C, I>,
    pub views: TemplateEngine,
}

impl<C: CategoryRepository, I: ItemRepository> CatalogState<C, I> {
    pub fn new(categories: C, items: I, views: TemplateEngine) -> Self {
        let categories = Arc::new(categories);
        let items = Arc::new(items);
        Self {
            categories: CategoryService::new(Arc::clone(&categories), Arc::clone(&items)),
            items: ItemService::new(categories, items),
            views,
        }
    }
}

impl<C: CategoryRepository, I: ItemRepository> Clone for CatalogState<C, I> {
    fn clone(&self) -> Self {
        Self {
            categories: self.categories.clone(),
            items: self.items.clone(),
            views: self.views.clone(),
        }
    }
}

/// Create the catalog router with all HTML endpoints.
///
/// Paths are absolute (`/catalog/...`) because redirects point at them.
pub fn router<C, I>(state: CatalogState<C, I>) -> Router
where
    C: CategoryRepository + 'static,
    I: ItemRepository + 'static,
{
    Router::new()
        .route("/", get(home))
        .route(CATALOG_HOME, get(index::<C, I>))
        .route(CATEGORY_LIST_URL, get(category_list::<C, I>))
        .route(
            "/catalog/category/create",
            get(category_create_form::<C, I>).post(category_create::<C, I>),
        )
        .route("/catalog/category/{id}", get(category_detail::<C, I>))
        .route(
            "/catalog/category/{id}/delete",
            get(category_delete_form::<C, I>).post(category_delete::<C, I>),
        )
        .route(
            "/catalog/category/{id}/update",
            get(category_update_form::<C, I>).post(category_update::<C, I>),
        )
        .route(ITEM_LIST_URL, get(item_list::<C, I>))
        .route(
            "/catalog/item/create",
            get(item_create_form::<C, I>).post(item_create::<C, I>),
        )
        .route("/catalog/item/{id}", get(item_detail::<C, I>))
        .route(
            "/catalog/item/{id}/delete",
            get(item_delete_form::<C, I>).post(item_delete::<C, I>),
        )
        .route(
            "/catalog/item/{id}/update",
            get(item_update_form::<C, I>).post(item_update::<C, I>),
        )
        .with_state(state)
}

async fn home() -> Redirect {
    Redirect::to(CATALOG_HOME)
}

/// Dashboard with record counts
async fn index<C: CategoryRepository, I: ItemRepository>(
    State(state): State<CatalogState<C, I>>,
) -> CatalogResult<Html<String>> {
    let counts = state.items.counts().await?;
    Ok(Html(state.views.render_index(&counts)?))
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

async fn category_list<C: CategoryRepository, I: ItemRepository>(
    State(state): State<CatalogState<C, I>>,
) -> CatalogResult<Html<String>> {
    let categories = state.categories.list().await?;
    Ok(Html(state.views.render_category_list(&categories)?))
}

async fn category_detail<C: CategoryRepository, I: ItemRepository>(
    State(state): State<CatalogState<C, I>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Html<String>> {
    let detail = state.categories.get_with_items(id).await?;
    Ok(Html(state.views.render_category_detail(&detail)?))
}

async fn category_create_form<C: CategoryRepository, I: ItemRepository>(
    State(state): State<CatalogState<C, I>>,
) -> CatalogResult<Html<String>> {
    let form = CategoryFormState::default();
    Ok(Html(state.views.render_category_form("Create Category", &form)?))
}

async fn category_create<C: CategoryRepository, I: ItemRepository>(
    State(state): State<CatalogState<C, I>>,
    Form(form): Form<CategoryForm>,
) -> CatalogResult<Response> {
    match state.categories.create(form).await? {
        Submission::Accepted(category) => Ok(Redirect::to(&category.url()).into_response()),
        Submission::Rejected(form) => {
            let html = state.views.render_category_form("Create Category", &form)?;
            Ok(Html(html).into_response())
        }
    }
}

async fn category_delete_form<C: CategoryRepository, I: ItemRepository>(
    State(state): State<CatalogState<C, I>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Response> {
    match state.categories.delete_preview(id).await? {
        Some(detail) => Ok(Html(state.views.render_category_delete(&detail)?).into_response()),
        None => Ok(Redirect::to(CATEGORY_LIST_URL).into_response()),
    }
}

async fn category_delete<C: CategoryRepository, I: ItemRepository>(
    State(state): State<CatalogState<C, I>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Response> {
    match state.categories.delete(id).await? {
        CategoryDeletion::Deleted | CategoryDeletion::Missing => {
            Ok(Redirect::to(CATEGORY_LIST_URL).into_response())
        }
        CategoryDeletion::Refused(detail) => {
            Ok(Html(state.views.render_category_delete(&detail)?).into_response())
        }
    }
}

async fn category_update_form<C: CategoryRepository, I: ItemRepository>(
    State(state): State<CatalogState<C, I>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Html<String>> {
    let form = state.categories.edit_form(id).await?;
    Ok(Html(state.views.render_category_form("Update Category", &form)?))
}

async fn category_update<C: CategoryRepository, I: ItemRepository>(
    State(state): State<CatalogState<C, I>>,
    UuidPath(id): UuidPath,
    Form(form): Form<CategoryForm>,
) -> CatalogResult<Response> {
    match state.categories.update(id, form).await? {
        Submission::Accepted(category) => Ok(Redirect::to(&category.url()).into_response()),
        Submission::Rejected(form) => {
            let html = state.views.render_category_form("Update Category", &form)?;
            Ok(Html(html).into_response())
        }
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

async fn item_list<C: CategoryRepository, I: ItemRepository>(
    State(state): State<CatalogState<C, I>>,
) -> CatalogResult<Html<String>> {
    let items = state.items.summary_list().await?;
    Ok(Html(state.views.render_item_list(&items)?))
}

async fn item_detail<C: CategoryRepository, I: ItemRepository>(
    State(state): State<CatalogState<C, I>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Html<String>> {
    let detail = state.items.get(id).await?;
    Ok(Html(state.views.render_item_detail(&detail)?))
}

async fn item_create_form<C: CategoryRepository, I: ItemRepository>(
    State(state): State<CatalogState<C, I>>,
) -> CatalogResult<Html<String>> {
    let form = state.items.blank_form().await?;
    Ok(Html(state.views.render_item_form("Create Item", &form)?))
}

async fn item_create<C: CategoryRepository, I: ItemRepository>(
    State(state): State<CatalogState<C, I>>,
    Form(form): Form<ItemForm>,
) -> CatalogResult<Response> {
    match state.items.create(ItemInput::from(form)).await? {
        Submission::Accepted(item) => Ok(Redirect::to(&item.url()).into_response()),
        Submission::Rejected(form) => {
            let html = state.views.render_item_form("Create Item", &form)?;
            Ok(Html(html).into_response())
        }
    }
}

async fn item_delete_form<C: CategoryRepository, I: ItemRepository>(
    State(state): State<CatalogState<C, I>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Response> {
    match state.items.delete_preview(id).await? {
        Some(detail) => Ok(Html(state.views.render_item_delete(&detail)?).into_response()),
        None => Ok(Redirect::to(ITEM_LIST_URL).into_response()),
    }
}

async fn item_delete<C: CategoryRepository, I: ItemRepository>(
    State(state): State<CatalogState<C, I>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Redirect> {
    state.items.delete(id).await?;
    Ok(Redirect::to(ITEM_LIST_URL))
}

async fn item_update_form<C: CategoryRepository, I: ItemRepository>(
    State(state): State<CatalogState<C, I>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Html<String>> {
    let form = state.items.edit_form(id).await?;
    Ok(Html(state.views.render_item_form("Update Item", &form)?))
}

async fn item_update<C: CategoryRepository, I: ItemRepository>(
    State(state): State<CatalogState<C, I>>,
    UuidPath(id): UuidPath,
    Form(form): Form<ItemForm>,
) -> CatalogResult<Response> {
    match state.items.update(id, ItemInput::from(form)).await? {
        Submission::Accepted(item) => Ok(Redirect::to(&item.url()).into_response()),
        Submission::Rejected(form) => {
            let html = state.views.render_item_form("Update Item", &form)?;
            Ok(Html(html).into_response())
        }
    }
}
