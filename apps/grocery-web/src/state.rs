//! Shared application state.

use mongodb::{Client, Database};

/// Handed to every router at startup. Cloning is cheap: the MongoDB
/// client shares one connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    /// Database holding the `categories` and `items` collections
    pub db: Database,
}
