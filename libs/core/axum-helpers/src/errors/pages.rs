//! HTML error pages.
//!
//! Handlers and extractors fail with [`super::AppError`]; this middleware is
//! the single place where those failures become user-facing HTML.
//!
//! ```ignore
//! let app = Router::new()
//!     .merge(routes)
//!     .layer(middleware::from_fn_with_state(renderer, render_error_pages::<MyRenderer>));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

use super::ErrorCode;

/// View-model for a generic error page
#[derive(Debug, Clone, Serialize)]
pub struct ErrorPage {
    pub status: u16,
    pub code: ErrorCode,
    pub title: String,
    pub message: String,
}

impl ErrorPage {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let status = code.status();
        Self {
            status: status.as_u16(),
            code,
            title: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message: message.into(),
        }
    }
}

/// Anything that can turn an [`ErrorPage`] into HTML.
///
/// Returning `None` keeps the plain-text fallback body.
pub trait ErrorPageRenderer: Send + Sync + 'static {
    fn render_error_page(&self, page: &ErrorPage) -> Option<String>;
}

/// Replace the body of every response carrying an [`ErrorPage`] with rendered HTML.
///
/// The status code of the original response is preserved.
pub async fn render_error_pages<R: ErrorPageRenderer>(
    State(renderer): State<Arc<R>>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    let Some(page) = response.extensions().get::<ErrorPage>().cloned() else {
        return response;
    };

    match renderer.render_error_page(&page) {
        Some(html) => {
            let mut rendered = (response.status(), Html(html)).into_response();
            rendered.extensions_mut().insert(page);
            rendered
        }
        None => response,
    }
}
