use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Failures of catalog operations.
///
/// Rejected forms and refused deletes are not errors; they are ordinary
/// outcomes re-rendered with 200 (see [`crate::models::Submission`] and
/// [`crate::models::CategoryDeletion`]).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CategoryNotFound(_) => AppError::NotFound("Category not found".into()),
            CatalogError::ItemNotFound(_) => AppError::NotFound("Item not found".into()),
            CatalogError::Database(msg) => AppError::Database(msg),
            CatalogError::Template(msg) => AppError::InternalServerError(msg),
            CatalogError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for CatalogError {
    fn from(err: mongodb::error::Error) -> Self {
        CatalogError::Database(err.to_string())
    }
}

impl From<handlebars::RenderError> for CatalogError {
    fn from(err: handlebars::RenderError) -> Self {
        CatalogError::Template(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_helpers::ErrorPage;

    #[test]
    fn test_not_found_maps_to_404_with_entity_message() {
        let response = CatalogError::CategoryNotFound(Uuid::now_v7()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let page = response.extensions().get::<ErrorPage>().unwrap();
        assert_eq!(page.message, "Category not found");
    }

    #[test]
    fn test_database_error_maps_to_500() {
        let response = CatalogError::Database("server selection timeout".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
