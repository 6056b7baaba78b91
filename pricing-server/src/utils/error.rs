//! Error handling
//!
//! API handlers return [`AppResult`] from `shared::error`. Services return
//! [`ServiceResult`]: storage failures travel as [`ServiceError::Repo`] and
//! are turned into an [`AppError`] (and logged) when they reach a handler.

use axum::response::IntoResponse;
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use crate::db::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(what) => AppError::not_found(what),
            RepoError::Duplicate(what) => AppError::already_exists(what),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::IdCollision(what) => {
                tracing::error!(record = %what, "Generated id already in use");
                AppError::internal(format!("Id collision on {}", what))
            }
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Store error");
                AppError::database(msg)
            }
        }
    }
}

/// Service-layer error
///
/// - `Repo`: storage error, mapped by kind (NotFound → 404, Duplicate → 409,
///   IdCollision → 500, ...)
/// - `App`: business-rule error, passed through to the client unchanged
#[derive(Debug)]
pub enum ServiceError {
    Repo(RepoError),
    App(AppError),
}

impl From<RepoError> for ServiceError {
    fn from(e: RepoError) -> Self {
        ServiceError::Repo(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Repo(repo_err) => repo_err.into(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;
