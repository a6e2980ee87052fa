//! Axum HTTP surface.

pub mod strings;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::analyzer::AnalyzeError;
use crate::filters::natural_language::ParseError;
use crate::models::ErrorBody;
use crate::state::AppState;
use crate::store::StoreError;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route(
            "/strings",
            get(strings::list_strings).post(strings::create_string),
        )
        // Static segment takes priority over the `{value}` capture
        .route(
            "/strings/filter-by-natural-language",
            get(strings::filter_by_natural_language),
        )
        .route(
            "/strings/{value}",
            get(strings::get_string).delete(strings::delete_string),
        )
        .with_state(state)
}

/// GET / - liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Error returned by every handler, rendered as `{"error", "message"}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "String does not exist in the system")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self
                .status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<AnalyzeError> for ApiError {
    fn from(e: AnalyzeError) -> Self {
        match e {
            AnalyzeError::ValueTooLong { .. } => {
                Self::new(StatusCode::PAYLOAD_TOO_LARGE, e.to_string())
            }
            AnalyzeError::InvalidType(_) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
        }
    }
}

impl From<ParseError> for ApiError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::ConflictingFilters(_) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            ParseError::Unparsable | ParseError::InvalidNumber(_) => {
                Self::bad_request("Unable to parse natural language query")
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(_) => {
                Self::new(StatusCode::CONFLICT, "String already exists in the system")
            }
            other => {
                tracing::error!("Store error: {other}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_errors_map_to_statuses() {
        let too_long = ApiError::from(AnalyzeError::ValueTooLong { length: 11, max: 10 });
        assert_eq!(too_long.status, StatusCode::PAYLOAD_TOO_LARGE);
        let bad_type = ApiError::from(AnalyzeError::InvalidType("number"));
        assert_eq!(bad_type.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_parse_errors_map_to_statuses() {
        assert_eq!(
            ApiError::from(ParseError::Unparsable).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ParseError::InvalidNumber("9".repeat(30))).status,
            StatusCode::BAD_REQUEST
        );
        let conflict = ApiError::from(ParseError::ConflictingFilters("x".to_string()));
        assert_eq!(conflict.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(conflict.message.contains("conflicting"));
    }

    #[test]
    fn test_store_conflict_is_409() {
        let err = ApiError::from(StoreError::Conflict("abc".to_string()));
        assert_eq!(err.status, StatusCode::CONFLICT);
    }
}
