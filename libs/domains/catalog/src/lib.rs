//! Catalog Domain
//!
//! Grocery inventory pages: categories and the items filed under them,
//! stored in MongoDB and rendered as HTML forms.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTML endpoints, redirects
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, duplicate detection, delete guarding
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (traits + MongoDB and in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, forms, outcomes
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{
//!     handlers::{self, CatalogState},
//!     mongodb::{MongoCategoryRepository, MongoItemRepository},
//!     views::TemplateEngine,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("inventory");
//!
//! let state = CatalogState::new(
//!     MongoCategoryRepository::new(&db),
//!     MongoItemRepository::new(&db),
//!     TemplateEngine::new()?,
//! );
//! let router = handlers::router(state);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod views;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use handlers::CatalogState;
pub use memory::InMemoryCatalogStore;
pub use models::{
    CatalogCounts, Category, CategoryDeletion, CategoryDetail, CategoryForm, CategorySelection,
    Item, ItemDetail, ItemFields, ItemForm, ItemInput, Submission,
};
pub use mongodb::{MongoCategoryRepository, MongoItemRepository};
pub use repository::{CategoryRepository, ItemRepository};
pub use service::{CategoryService, ItemService};
pub use views::TemplateEngine;
