use super::AppError;

/// Fallback handler for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("The requested page was not found".to_string())
}
