pub mod codes;
pub mod handlers;
pub mod pages;

pub use codes::ErrorCode;
pub use pages::{ErrorPage, ErrorPageRenderer, render_error_pages};

use axum::{
    Extension,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error type shared by every domain.
///
/// Converting into a response never renders HTML itself. It sets the status,
/// a plain-text body and an [`ErrorPage`] extension; the
/// [`render_error_pages`] middleware turns that extension into the final page.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::BadRequest(_) => ErrorCode::BadRequest,
            AppError::InvalidUuid(_) => ErrorCode::InvalidUuid,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
            AppError::ServiceUnavailable(_) => ErrorCode::ServiceUnavailable,
        }
    }

    /// The page a user sees for this error. Server-side details stay in the logs.
    pub fn page(&self) -> ErrorPage {
        let code = self.code();
        let message = match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::InvalidUuid(_)
            | AppError::Database(_)
            | AppError::InternalServerError(_)
            | AppError::ServiceUnavailable(_) => code.default_message().to_string(),
        };
        ErrorPage::new(code, message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        match &self {
            AppError::Database(detail) | AppError::InternalServerError(detail) => {
                tracing::error!(error_code = code.code(), error = %detail, "Request failed");
            }
            AppError::ServiceUnavailable(detail) => {
                tracing::warn!(error_code = code.code(), error = %detail, "Service unavailable");
            }
            AppError::BadRequest(detail)
            | AppError::InvalidUuid(detail)
            | AppError::NotFound(detail) => {
                tracing::info!(error_code = code.code(), "{}", detail);
            }
        }

        let page = self.page();
        let body = format!("{}: {}", page.title, page.message);
        (code.status(), Extension(page), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_not_found_keeps_message() {
        let response = AppError::NotFound("Category not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let page = response.extensions().get::<ErrorPage>().unwrap();
        assert_eq!(page.message, "Category not found");
        assert_eq!(page.status, 404);
    }

    #[test]
    fn test_database_error_hides_details() {
        let response =
            AppError::Database("connection reset by 10.0.0.7:27017".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let page = response.extensions().get::<ErrorPage>().unwrap();
        assert!(!page.message.contains("10.0.0.7"));
        assert_eq!(page.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn test_invalid_uuid_is_bad_request() {
        let response = AppError::InvalidUuid("abc".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
