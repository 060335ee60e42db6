//! Converts every failed backend call into an [`ApiError`].

use docchat_core::api::ApiError;
use reqwest::StatusCode;
use serde::Deserialize;

/// FastAPI's default error body (`HTTPException`, validation errors).
#[derive(Deserialize)]
struct DetailBody {
    detail: serde_json::Value,
}

/// Maps a non-2xx response to the uniform error shape.
///
/// Precedence: a backend error body is passed through as is, then a
/// `{"detail": ...}` body, then the raw body text or the status reason.
pub fn normalize_http_error(status: StatusCode, body: &str) -> ApiError {
    if let Ok(api_error) = serde_json::from_str::<ApiError>(body) {
        return api_error;
    }

    if let Ok(wrapper) = serde_json::from_str::<DetailBody>(body) {
        let message = match wrapper.detail {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        };
        return ApiError::http(status.as_u16(), message);
    }

    let text = body.trim();
    let message = if !text.is_empty() {
        text.to_string()
    } else {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
    };
    ApiError::http(status.as_u16(), message)
}

/// Maps a request that never produced a response.
pub fn transport_error(err: reqwest::Error) -> ApiError {
    let message = err.to_string();
    if message.is_empty() {
        ApiError::network("Network error occurred")
    } else {
        ApiError::network(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docchat_core::api::error_codes;

    #[test]
    fn test_backend_error_body_passes_through() {
        let body = r#"{"success": false, "error": "No PDF in session", "error_code": "NO_PDF"}"#;
        let err = normalize_http_error(StatusCode::BAD_REQUEST, body);
        assert_eq!(err, ApiError::new("No PDF in session", "NO_PDF"));
    }

    #[test]
    fn test_detail_string() {
        let err = normalize_http_error(StatusCode::NOT_FOUND, r#"{"detail": "Session not found"}"#);
        assert_eq!(err.error, "Session not found");
        assert_eq!(err.error_code, "HTTP_404");
    }

    #[test]
    fn test_detail_validation_list_is_stringified() {
        let body = r#"{"detail": [{"loc": ["body", "question"], "msg": "field required"}]}"#;
        let err = normalize_http_error(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(err.error_code, "HTTP_422");
        assert!(err.error.contains("field required"));
    }

    #[test]
    fn test_plain_text_body() {
        let err = normalize_http_error(StatusCode::BAD_GATEWAY, "upstream down\n");
        assert_eq!(err, ApiError::http(502, "upstream down"));
    }

    #[test]
    fn test_empty_body_uses_reason_phrase() {
        let err = normalize_http_error(StatusCode::SERVICE_UNAVAILABLE, "");
        assert_eq!(err.error, "Service Unavailable");
        assert_eq!(err.error_code, "HTTP_503");
        assert_ne!(err.error_code, error_codes::NETWORK_ERROR);
    }
}
