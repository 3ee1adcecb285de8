//! The uniform response envelope returned by every facade call.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Why a call failed. Not serialized; used to pick an HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Lookup by id or slug found nothing.
    NotFound,
    /// Input failed validation.
    Invalid,
}

/// `{success, data, error, message}` wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip)]
    pub failure: Option<FailureKind>,
}

impl<T> ApiResponse<T> {
    /// A successful response carrying `data`.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            failure: None,
        }
    }

    /// A failed lookup.
    #[must_use]
    pub fn not_found(error: impl Into<String>) -> Self {
        Self::failed(FailureKind::NotFound, error.into())
    }

    /// A validation failure.
    #[must_use]
    pub fn invalid(error: impl Into<String>) -> Self {
        Self::failed(FailureKind::Invalid, error.into())
    }

    const fn failed(kind: FailureKind, error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            message: None,
            failure: Some(kind),
        }
    }

    /// Wrap an optional lookup result, using `error` when it is `None`.
    #[must_use]
    pub fn found_or(data: Option<T>, error: &str) -> Self {
        data.map_or_else(|| Self::not_found(error), Self::ok)
    }

    /// Attach a human-readable message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Convert into a `Result`, yielding the error string on failure.
    ///
    /// # Errors
    ///
    /// Returns the envelope's error message when the call did not succeed
    /// or carried no data.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.error.unwrap_or_else(|| "Unknown error".to_string())),
        }
    }

    /// HTTP status for this envelope.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.failure {
            None => StatusCode::OK,
            Some(FailureKind::NotFound) => StatusCode::NOT_FOUND,
            Some(FailureKind::Invalid) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_serializes_without_error_fields() {
        let json = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": [1, 2]}));
    }

    #[test]
    fn test_not_found_serializes_error() {
        let response: ApiResponse<u8> = ApiResponse::not_found("Product not found");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "error": "Product not found"})
        );
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ApiResponse::ok(3).into_result(), Ok(3));
        assert_eq!(
            ApiResponse::<u8>::invalid("Invalid email address").into_result(),
            Err("Invalid email address".to_string())
        );
    }

    #[test]
    fn test_found_or() {
        assert!(ApiResponse::found_or(Some(1), "missing").success);
        let missing = ApiResponse::<u8>::found_or(None, "missing");
        assert_eq!(missing.error.as_deref(), Some("missing"));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
