//! HTML rendering for catalog pages.
//!
//! A Handlebars registry with one template per page. Text is HTML-escaped
//! on output; stored values are never pre-escaped.

mod templates;

use axum_helpers::{ErrorPage, ErrorPageRenderer};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    CatalogCounts, Category, CategoryDetail, CategoryFormState, ItemDetail, ItemFormState,
    ItemListEntry, ItemSummary, category_url, item_url,
};

const PAGES: [(&str, &str); 11] = [
    ("layout", templates::LAYOUT),
    ("index", templates::INDEX),
    ("category_list", templates::CATEGORY_LIST),
    ("category_detail", templates::CATEGORY_DETAIL),
    ("category_form", templates::CATEGORY_FORM),
    ("category_delete", templates::CATEGORY_DELETE),
    ("item_list", templates::ITEM_LIST),
    ("item_detail", templates::ITEM_DETAIL),
    ("item_form", templates::ITEM_FORM),
    ("item_delete", templates::ITEM_DELETE),
    ("error", templates::ERROR),
];

/// Template engine for catalog pages.
#[derive(Clone)]
pub struct TemplateEngine {
    handlebars: Arc<Handlebars<'static>>,
}

impl TemplateEngine {
    /// Create a new template engine with all templates registered.
    pub fn new() -> CatalogResult<Self> {
        let mut handlebars = Handlebars::new();

        for (name, source) in PAGES {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| {
                    CatalogError::Template(format!("Failed to register {}: {}", name, e))
                })?;
        }

        Ok(Self {
            handlebars: Arc::new(handlebars),
        })
    }

    /// Render `template` and wrap it in the page layout.
    fn render_page<T: Serialize>(
        &self,
        template: &str,
        title: &str,
        data: &T,
    ) -> CatalogResult<String> {
        debug!(template, "Rendering page");
        let content = self.handlebars.render(template, data)?;
        let page = self
            .handlebars
            .render("layout", &json!({ "title": title, "content": content }))?;
        Ok(page)
    }

    pub fn render_index(&self, counts: &CatalogCounts) -> CatalogResult<String> {
        let title = "Groceries Inventory";
        self.render_page(
            "index",
            title,
            &json!({
                "title": title,
                "item_count": counts.items,
                "category_count": counts.categories,
            }),
        )
    }

    pub fn render_category_list(&self, categories: &[Category]) -> CatalogResult<String> {
        let title = "Category List";
        let categories: Vec<Value> = categories.iter().map(category_link).collect();
        self.render_page(
            "category_list",
            title,
            &json!({ "title": title, "categories": categories }),
        )
    }

    pub fn render_category_detail(&self, detail: &CategoryDetail) -> CatalogResult<String> {
        self.render_page("category_detail", "Category Detail", &category_with_items(detail))
    }

    /// Create or update form; `title` tells which
    pub fn render_category_form(
        &self,
        title: &str,
        state: &CategoryFormState,
    ) -> CatalogResult<String> {
        self.render_page(
            "category_form",
            title,
            &json!({ "title": title, "name": state.name, "errors": state.errors }),
        )
    }

    /// Delete confirmation, or the list of blocking items when `detail.items` is non-empty
    pub fn render_category_delete(&self, detail: &CategoryDetail) -> CatalogResult<String> {
        let title = "Delete Category";
        let mut data = category_with_items(detail);
        data["title"] = json!(title);
        self.render_page("category_delete", title, &data)
    }

    pub fn render_item_list(&self, items: &[ItemListEntry]) -> CatalogResult<String> {
        let title = "Item List";
        let items: Vec<Value> = items
            .iter()
            .map(|entry| {
                json!({
                    "name": entry.name,
                    "quantity": entry.quantity,
                    "url": item_url(entry.id),
                })
            })
            .collect();
        self.render_page("item_list", title, &json!({ "title": title, "items": items }))
    }

    pub fn render_item_detail(&self, detail: &ItemDetail) -> CatalogResult<String> {
        let title = detail.item.name.clone();
        self.render_page("item_detail", &title, &item_with_categories(detail))
    }

    /// Create or update form; `title` tells which
    pub fn render_item_form(&self, title: &str, state: &ItemFormState) -> CatalogResult<String> {
        self.render_page(
            "item_form",
            title,
            &json!({
                "title": title,
                "input": state.input,
                "categories": state.categories,
                "errors": state.errors,
            }),
        )
    }

    pub fn render_item_delete(&self, detail: &ItemDetail) -> CatalogResult<String> {
        let title = "Delete Item";
        let mut data = item_with_categories(detail);
        data["title"] = json!(title);
        self.render_page("item_delete", title, &data)
    }

    pub fn render_error(&self, page: &ErrorPage) -> CatalogResult<String> {
        self.render_page("error", &page.title, page)
    }
}

impl ErrorPageRenderer for TemplateEngine {
    fn render_error_page(&self, page: &ErrorPage) -> Option<String> {
        self.render_error(page)
            .inspect_err(|e| tracing::error!(error = %e, "Failed to render error page"))
            .ok()
    }
}

fn category_link(category: &Category) -> Value {
    json!({
        "id": category.id,
        "name": category.name,
        "url": category_url(category.id),
    })
}

fn item_summary(item: &ItemSummary) -> Value {
    json!({
        "name": item.name,
        "description": item.description,
        "url": item_url(item.id),
    })
}

fn category_with_items(detail: &CategoryDetail) -> Value {
    let items: Vec<Value> = detail.items.iter().map(item_summary).collect();
    json!({
        "category": category_link(&detail.category),
        "items": items,
    })
}

fn item_with_categories(detail: &ItemDetail) -> Value {
    let item = &detail.item;
    let categories: Vec<Value> = detail.categories.iter().map(category_link).collect();
    json!({
        "item": {
            "name": item.name,
            "description": item.description,
            "price": item.price,
            "quantity": item.quantity,
            "url": item.url(),
        },
        "categories": categories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryOption, FieldError, Item, ItemFields, ItemInput};
    use axum_helpers::ErrorCode;
    use std::collections::BTreeSet;

    fn engine() -> TemplateEngine {
        TemplateEngine::new().unwrap()
    }

    #[test]
    fn test_all_templates_register() {
        assert!(TemplateEngine::new().is_ok());
    }

    #[test]
    fn test_index_shows_counts_inside_layout() {
        let html = engine()
            .render_index(&CatalogCounts { items: 6, categories: 3 })
            .unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Groceries Inventory</title>"));
        assert!(html.contains("<strong>Items:</strong> 6"));
        assert!(html.contains("<strong>Categories:</strong> 3"));
    }

    #[test]
    fn test_text_is_escaped_on_output() {
        let category = Category::new("<script>alert(1)</script>");
        let html = engine().render_category_list(&[category]).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_category_delete_lists_blocking_items() {
        let category = Category::new("Produce");
        let item = Item::new(ItemFields {
            name: "Carrot".into(),
            description: "Orange".into(),
            price: 0.5,
            quantity: 4,
            category: BTreeSet::from([category.id]),
        });
        let detail = CategoryDetail {
            category,
            items: vec![ItemSummary::from(&item)],
        };

        let html = engine().render_category_delete(&detail).unwrap();
        assert!(html.contains("Delete the following items"));
        assert!(html.contains("Carrot"));
        assert!(!html.contains("<form method=\"POST\">"));
    }

    #[test]
    fn test_category_delete_confirmation_when_unreferenced() {
        let detail = CategoryDetail {
            category: Category::new("Bakery"),
            items: vec![],
        };
        let html = engine().render_category_delete(&detail).unwrap();
        assert!(html.contains("Do you really want to delete this category?"));
    }

    #[test]
    fn test_item_form_marks_checked_boxes_and_errors() {
        let fruit = Category::new("Fruit");
        let dairy = Category::new("Dairy");
        let state = ItemFormState {
            input: ItemInput {
                name: String::new(),
                description: "Crunchy".into(),
                price: "0.5".into(),
                quantity: "3".into(),
                category: BTreeSet::from([fruit.id.to_string()]),
            },
            categories: CategoryOption::mark(
                vec![dairy.clone(), fruit.clone()],
                &BTreeSet::from([fruit.id]),
            ),
            errors: vec![FieldError::new("name", "Name must not be empty.")],
        };

        let html = engine().render_item_form("Create Item", &state).unwrap();
        assert!(html.contains(&format!("value=\"{}\" checked", fruit.id)));
        assert!(!html.contains(&format!("value=\"{}\" checked", dairy.id)));
        assert!(html.contains("Name must not be empty."));
        assert!(html.contains(">Crunchy</textarea>"));
    }

    #[test]
    fn test_error_page_renders_title_and_message() {
        let page = ErrorPage::new(ErrorCode::NotFound, "Item not found");
        let html = engine().render_error_page(&page).unwrap();
        assert!(html.contains("<h1>Not Found</h1>"));
        assert!(html.contains("Item not found"));
    }
}
