use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rating_contract::errors::{InvokeError, RatingError};
use serde_json::json;
use thiserror::Error;

/// Central error type for the rating gateway
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl From<RatingError> for AppError {
    fn from(err: RatingError) -> Self {
        match err {
            RatingError::AlreadyExists { .. } => AppError::Conflict(err.to_string()),
            RatingError::NotFound { .. } => AppError::NotFound(err.to_string()),
            RatingError::PlatformIO(_) => AppError::ServiceUnavailable(err.to_string()),
            RatingError::Decode { .. } | RatingError::Encode { .. } => {
                AppError::InternalError(anyhow::Error::new(err))
            }
        }
    }
}

impl From<InvokeError> for AppError {
    fn from(err: InvokeError) -> Self {
        match err {
            InvokeError::Rating(inner) => inner.into(),
            InvokeError::Encode { .. } => AppError::InternalError(anyhow::Error::new(err)),
            InvokeError::UnknownFunction { .. }
            | InvokeError::ArgumentCount { .. }
            | InvokeError::InvalidArgument { .. } => AppError::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, code) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg, "ALREADY_EXISTS"),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                msg,
                "PLATFORM_UNAVAILABLE",
            ),
            AppError::InternalError(err) => {
                tracing::error!(error = %err, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "INTERNAL_ERROR",
                )
            }
        };

        let body = Json(json!({
            "error": code,
            "message": error_message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rating_contract::errors::PlatformError;

    #[test]
    fn test_rating_errors_map_to_kinds() {
        let conflict: AppError = RatingError::AlreadyExists {
            ledger_id: "u1:delivery".to_string(),
        }
        .into();
        assert!(matches!(conflict, AppError::Conflict(_)));

        let missing: AppError = RatingError::NotFound {
            ledger_id: "u1:delivery".to_string(),
        }
        .into();
        assert!(matches!(missing, AppError::NotFound(_)));

        let platform: AppError = RatingError::PlatformIO(PlatformError::Read {
            key: "k".to_string(),
            reason: "down".to_string(),
        })
        .into();
        assert!(matches!(platform, AppError::ServiceUnavailable(_)));

        let decode: AppError = RatingError::Decode {
            ledger_id: "k".to_string(),
            reason: "eof".to_string(),
        }
        .into();
        assert!(matches!(decode, AppError::InternalError(_)));
    }

    #[test]
    fn test_invoke_errors_unwrap_rating_errors() {
        let err: AppError = InvokeError::Rating(RatingError::NotFound {
            ledger_id: "k".to_string(),
        })
        .into();
        assert!(matches!(err, AppError::NotFound(_)));

        let err: AppError = InvokeError::UnknownFunction {
            name: "Drop".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Conflict("x".into()).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::ServiceUnavailable("x".into()).into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
