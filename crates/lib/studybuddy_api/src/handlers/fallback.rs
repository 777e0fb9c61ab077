//! Fallbacks for `/api` requests no handler accepts.

use axum::http::{Method, Uri};

use crate::error::AppError;

/// Unknown `/api/*` path. These never fall through to the SPA shell.
pub async fn api_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No API route for {}", uri.path()))
}

/// Known `/api` path, wrong method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed(format!("{method} is not supported on {}", uri.path()))
}
