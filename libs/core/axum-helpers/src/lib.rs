//! # Axum Helpers
//!
//! Shared building blocks for the server-rendered web apps.
//!
//! ## Modules
//!
//! - **[`server`]**: Router layers, health checks, graceful shutdown
//! - **[`http`]**: Security header middleware
//! - **[`errors`]**: Application error type and HTML error pages
//! - **[`extractors`]**: Custom extractors (UUID path)
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let routes = Router::new(); // Add your routes
//!     let router = create_router(routes).merge(health_router(app_info!()));
//!
//!     let config = ServerConfig::default();
//!     create_production_app(router, &config, Duration::from_secs(30), async {}).await
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::security_headers;

pub use errors::{AppError, ErrorCode, ErrorPage, ErrorPageRenderer, render_error_pages};

pub use extractors::UuidPath;
