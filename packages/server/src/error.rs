use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::storage::StorageError;
use sea_orm::DbErr;
use serde::Serialize;

use crate::catalog::CatalogError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `READ_ERROR`,
    /// `WRITE_ERROR`, `NOT_FOUND`, `INVALID_NAME`, `IMAGE_NOT_FOUND`,
    /// `INTERNAL_ERROR`.
    #[schema(example = "NOT_FOUND")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Category 'nonexistent' does not exist")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    Read(String),
    Write(String),
    /// A referenced record is missing. Reported as a client error.
    NotFound(String),
    InvalidName(String),
    /// Neither the requested image nor the default placeholder exists.
    ImageNotFound(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::Read(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "READ_ERROR",
                    message: msg,
                },
            ),
            AppError::Write(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "WRITE_ERROR",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::InvalidName(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "INVALID_NAME",
                    message: msg,
                },
            ),
            AppError::ImageNotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "IMAGE_NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if status.is_client_error() {
            tracing::debug!(code = body.code, "Request rejected: {}", body.message);
        }
        (status, Json(body)).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(msg) => AppError::Validation(msg),
            CatalogError::Read(msg) => AppError::Read(msg),
            CatalogError::Write(msg) => AppError::Write(msg),
            CatalogError::NotFound(msg) => AppError::NotFound(msg),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidName(msg) | StorageError::InvalidHash(msg) => {
                AppError::InvalidName(msg)
            }
            StorageError::NotFound(name) => {
                tracing::warn!("Default image '{name}' is missing");
                AppError::ImageNotFound(format!("Image not found and no default image '{name}'"))
            }
            StorageError::SizeLimitExceeded { .. } => AppError::Validation(err.to_string()),
            StorageError::Read(_) => AppError::Read(err.to_string()),
            StorageError::Write(_) => AppError::Write(err.to_string()),
            StorageError::Io(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}
