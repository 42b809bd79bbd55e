use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error as StdError;
use thiserror::Error;

/// A type alias for a boxed error that is thread-safe.
type BoxedError = Box<dyn StdError + Send + Sync>;

/// JSON-RPC 2.0 error codes.
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// The structured error object returned to the calling client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ErrorData {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ErrorData {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("Method not found: {method}"))
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(PARSE_ERROR, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(INVALID_REQUEST, message)
    }
}

/// Represents errors that can occur during tool invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {name}")]
    NotFound { name: String },

    /// The call arguments did not match the tool's input type.
    #[error("Input deserialization failed for tool '{name}': {error}")]
    InputDeserialization {
        name: String,
        #[source]
        error: BoxedError,
    },

    /// The tool ran and reported a structured error. It reaches the client unchanged.
    #[error("Tool execution failed for tool '{name}': {error}")]
    Execution {
        name: String,
        #[source]
        error: ErrorData,
    },
}

impl ToolError {
    /// Creates a "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Creates an "input deserialization" error, wrapping the source error.
    pub fn input_deserialization(
        name: impl Into<String>,
        error: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::InputDeserialization {
            name: name.into(),
            error: Box::new(error),
        }
    }

    /// Creates a "tool execution" error carrying the tool's own error object.
    pub fn execution(name: impl Into<String>, error: ErrorData) -> Self {
        Self::Execution {
            name: name.into(),
            error,
        }
    }
}

impl From<ToolError> for ErrorData {
    fn from(error: ToolError) -> Self {
        match error {
            ToolError::NotFound { name } => ErrorData::invalid_params(format!("Unknown tool: {name}")),
            ToolError::InputDeserialization { name, error } => {
                ErrorData::invalid_params(format!("Invalid arguments for tool '{name}': {error}"))
            }
            ToolError::Execution { error, .. } => error,
        }
    }
}
