use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeSet;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 250;

pub fn category_url(id: Uuid) -> String {
    format!("/catalog/category/{}", id)
}

pub fn item_url(id: Uuid) -> String {
    format!("/catalog/item/{}", id)
}

/// Category entity - stored in the `categories` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
        }
    }

    pub fn url(&self) -> String {
        category_url(self.id)
    }
}

/// Item entity - stored in the `items` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    /// Referenced category ids; a set, stored as an array
    #[serde(default)]
    pub category: BTreeSet<Uuid>,
}

impl Item {
    /// Create a new item with a fresh id
    pub fn new(fields: ItemFields) -> Self {
        Self::with_id(Uuid::now_v7(), fields)
    }

    /// Build the full replacement document for an existing id
    pub fn with_id(id: Uuid, fields: ItemFields) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            quantity: fields.quantity,
            category: fields.category,
        }
    }

    pub fn url(&self) -> String {
        item_url(self.id)
    }
}

/// Validated, typed item fields ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub category: BTreeSet<Uuid>,
}

/// `items` projected to name and quantity (item list page)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemListEntry {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub quantity: i64,
}

/// `items` projected to name and description (category pages)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl From<&Item> for ItemListEntry {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            quantity: item.quantity,
        }
    }
}

impl From<&Item> for ItemSummary {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// Category create/update form body
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CategoryForm {
    #[serde(default)]
    #[validate(length(min = 3, message = "Category name must contain at least 3 characters"))]
    pub name: String,
}

impl CategoryForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }
}

/// The `category` field of an item form.
///
/// Browsers send nothing when no box is checked, one value for a single box
/// and a repeated key for several.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CategorySelection {
    One(String),
    Many(Vec<String>),
}

impl CategorySelection {
    /// Canonical set of submitted values; an absent field is the empty set.
    pub fn normalize(selection: Option<Self>) -> BTreeSet<String> {
        match selection {
            None => BTreeSet::new(),
            Some(CategorySelection::One(value)) => BTreeSet::from([value.trim().to_string()]),
            Some(CategorySelection::Many(values)) => {
                values.iter().map(|v| v.trim().to_string()).collect()
            }
        }
    }
}

/// Item create/update form body as it arrives on the wire
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub category: Option<CategorySelection>,
}

/// Item form after normalization: trimmed text and a category set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct ItemInput {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(custom(function = "validate_description"))]
    pub description: String,
    #[validate(custom(function = "validate_price"))]
    pub price: String,
    #[validate(custom(function = "validate_quantity"))]
    pub quantity: String,
    #[validate(custom(function = "validate_category_refs"))]
    pub category: BTreeSet<String>,
}

impl From<ItemForm> for ItemInput {
    fn from(form: ItemForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            description: form.description.trim().to_string(),
            price: form.price.trim().to_string(),
            quantity: form.quantity.trim().to_string(),
            category: CategorySelection::normalize(form.category),
        }
    }
}

impl ItemInput {
    /// Prefill for the update form
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.to_string(),
            quantity: item.quantity.to_string(),
            category: item.category.iter().map(Uuid::to_string).collect(),
        }
    }

    /// Category ids that parse; invalid values are reported by validation
    pub fn selected_ids(&self) -> BTreeSet<Uuid> {
        self.category
            .iter()
            .filter_map(|value| Uuid::parse_str(value).ok())
            .collect()
    }

    /// Validate and convert into typed fields.
    pub fn parse(&self) -> Result<ItemFields, Vec<FieldError>> {
        self.validate()
            .map_err(|errors| FieldError::from_validation(&errors))?;

        let price = self
            .price
            .parse::<f64>()
            .map_err(|_| vec![FieldError::new("price", PRICE_NOT_A_NUMBER)])?;
        let quantity = self
            .quantity
            .parse::<i64>()
            .map_err(|_| vec![FieldError::new("quantity", QUANTITY_NOT_WHOLE)])?;

        Ok(ItemFields {
            name: self.name.clone(),
            description: self.description.clone(),
            price,
            quantity,
            category: self.selected_ids(),
        })
    }
}

const PRICE_NOT_A_NUMBER: &str = "Price must be a number.";
const QUANTITY_NOT_WHOLE: &str = "Quantity must be a whole number.";

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(invalid("required", "Name must not be empty."));
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(invalid("length", "Name must be at most 100 characters."));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.is_empty() {
        return Err(invalid("required", "Description must not be empty."));
    }
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(invalid(
            "length",
            "Description must be at most 250 characters.",
        ));
    }
    Ok(())
}

fn validate_price(price: &str) -> Result<(), ValidationError> {
    if price.is_empty() {
        return Err(invalid("required", "Price must not be empty."));
    }
    match price.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(()),
        _ => Err(invalid("number", PRICE_NOT_A_NUMBER)),
    }
}

fn validate_quantity(quantity: &str) -> Result<(), ValidationError> {
    if quantity.is_empty() {
        return Err(invalid("required", "Quantity must not be empty"));
    }
    quantity
        .parse::<i64>()
        .map(|_| ())
        .map_err(|_| invalid("integer", QUANTITY_NOT_WHOLE))
}

fn validate_category_refs(category: &BTreeSet<String>) -> Result<(), ValidationError> {
    if category.iter().all(|value| Uuid::parse_str(value).is_ok()) {
        Ok(())
    } else {
        Err(invalid(
            "reference",
            "Category selection is not a valid reference.",
        ))
    }
}

/// One failed form field, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Flatten validator output, ordered the way the form lays out its fields.
    pub fn from_validation(errors: &ValidationErrors) -> Vec<Self> {
        let mut flat: Vec<Self> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    FieldError::new(field.clone(), message)
                })
            })
            .collect();

        flat.sort_by(|a, b| {
            field_rank(&a.field)
                .cmp(&field_rank(&b.field))
                .then_with(|| a.field.cmp(&b.field))
        });
        flat
    }
}

fn field_rank(field: &str) -> usize {
    const ORDER: [&str; 5] = ["name", "description", "price", "quantity", "category"];
    ORDER
        .iter()
        .position(|known| *known == field)
        .unwrap_or(ORDER.len())
}

// ---------------------------------------------------------------------------
// Operation outcomes and read models
// ---------------------------------------------------------------------------

/// Result of a form post: persisted, or handed back for correction
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<T, F> {
    Accepted(T),
    Rejected(F),
}

/// Category form to (re-)display
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryFormState {
    pub name: String,
    pub errors: Vec<FieldError>,
}

/// A category checkbox on the item form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryOption {
    pub id: Uuid,
    pub name: String,
    pub checked: bool,
}

impl CategoryOption {
    /// Mark each category whose id is in `selected`, keeping the input order.
    pub fn mark(categories: Vec<Category>, selected: &BTreeSet<Uuid>) -> Vec<Self> {
        categories
            .into_iter()
            .map(|category| CategoryOption {
                checked: selected.contains(&category.id),
                id: category.id,
                name: category.name,
            })
            .collect()
    }
}

/// Item form to (re-)display
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemFormState {
    pub input: ItemInput,
    pub categories: Vec<CategoryOption>,
    pub errors: Vec<FieldError>,
}

/// A category with every item that references it
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDetail {
    pub category: Category,
    pub items: Vec<ItemSummary>,
}

/// An item with its category references resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetail {
    pub item: Item,
    pub categories: Vec<Category>,
}

/// Outcome of a category delete request
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryDeletion {
    Deleted,
    /// Nothing to delete
    Missing,
    /// Items still reference the category; nothing changed
    Refused(CategoryDetail),
}

/// Record counts shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub items: u64,
    pub categories: u64,
}
