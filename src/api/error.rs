use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorResponse;
use crate::services::CafeError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    Forbidden(String),

    BadRequest(String),

    Conflict(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            ApiError::NotFound(msg)
            | ApiError::Forbidden(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Conflict(msg) => msg,
        };

        let reason = status.canonical_reason().unwrap_or("Error");
        (status, Json(ErrorResponse::new(reason, message))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<CafeError> for ApiError {
    fn from(err: CafeError) -> Self {
        match err {
            CafeError::NotFound(id) => Self::cafe_not_found(id),
            CafeError::Forbidden => Self::Forbidden("Invalid API Key.".to_string()),
            CafeError::Duplicate(name) => {
                Self::Conflict(format!("A cafe named '{name}' already exists."))
            }
            CafeError::EmptyCollection => {
                Self::NotFound("Sorry, we don't have any cafes yet.".to_string())
            }
            CafeError::Database(msg) => Self::internal(msg),
        }
    }
}

impl ApiError {
    pub fn cafe_not_found(id: impl fmt::Display) -> Self {
        ApiError::NotFound(format!("Sorry, a cafe with id {} was not found.", id))
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::InternalError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CafeId;

    #[test]
    fn cafe_errors_map_to_statuses() {
        assert_eq!(
            ApiError::from(CafeError::NotFound(CafeId::new(1))).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(CafeError::Forbidden).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(CafeError::Duplicate("x".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(CafeError::EmptyCollection).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(CafeError::Database("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
