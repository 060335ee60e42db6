//! Uniform error shape for backend calls.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error codes produced on the client side.
///
/// Codes sent by the backend are passed through unchanged.
pub mod error_codes {
    /// The request never produced an HTTP response.
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    /// A 2xx response whose body could not be decoded.
    pub const INVALID_RESPONSE: &str = "INVALID_RESPONSE";
    /// The selected file is not a PDF.
    pub const INVALID_FILE_TYPE: &str = "INVALID_FILE_TYPE";
    /// The selected file does not exist or cannot be read.
    pub const FILE_NOT_FOUND: &str = "FILE_NOT_FOUND";
    /// A question was asked without an uploaded document.
    pub const NO_SESSION: &str = "NO_SESSION";
}

fn default_false() -> bool {
    false
}

/// `{success: false, error, error_code}`.
///
/// Every failed backend call, whether the server answered with an error body
/// or the transport failed, ends up in this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default = "default_false")]
    pub success: bool,
    pub error: String,
    pub error_code: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>, error_code: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            error_code: error_code.into(),
        }
    }

    /// Transport-level failure (connection refused, DNS, timeout, ...).
    pub fn network(error: impl Into<String>) -> Self {
        Self::new(error, error_codes::NETWORK_ERROR)
    }

    /// Non-2xx response without a structured error body.
    pub fn http(status: u16, error: impl Into<String>) -> Self {
        Self::new(error, format!("HTTP_{}", status))
    }

    /// 2xx response whose body did not match the expected type.
    pub fn invalid_response(error: impl Into<String>) -> Self {
        Self::new(error, error_codes::INVALID_RESPONSE)
    }

    pub fn is_network(&self) -> bool {
        self.error_code == error_codes::NETWORK_ERROR
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.error, self.error_code)
    }
}

impl std::error::Error for ApiError {}
