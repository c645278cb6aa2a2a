//! Structured operation results.
//!
//! Failures are surfaced as response values, never as panics; the error
//! kind and message travel to the caller inside the response body.

use alpha_common::AlphaError;
use serde::Serialize;
use serde_json::Value;

/// Result of a state-changing or scalar-reading operation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TxResponse {
    pub status: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl TxResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn ok_with_data(message: impl Into<String>, data: Value) -> Self {
        Self {
            status: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl From<AlphaError> for TxResponse {
    fn from(err: AlphaError) -> Self {
        Self {
            status: false,
            message: err.to_string(),
            data: None,
        }
    }
}

/// Result of a query operation: data on success, error text otherwise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QueryResponse {
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            status: true,
            data: Some(data),
            error: None,
        }
    }
}

impl From<AlphaError> for QueryResponse {
    fn from(err: AlphaError) -> Self {
        Self {
            status: false,
            data: None,
            error: Some(err.to_string()),
        }
    }
}
