use serde_json::json;
use thiserror::Error;

use crate::core::mcp::{self, RpcResp, INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND};

/// Request-scoped failures raised while routing one MCP request.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("Method not found")]
    MethodNotFound(String),
    #[error("Invalid params")]
    InvalidParams(String),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Unknown prompt: {0}")]
    UnknownPrompt(String),
    /// Upstream weather failure. The message is built by us and safe to show.
    #[error("Error getting weather: {0}")]
    Upstream(String),
    /// Unexpected failure; the detail is logged but never returned.
    #[error("Internal error")]
    Internal(String),
}

impl McpError {
    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self::InvalidParams(detail.into())
    }

    pub fn upstream(err: impl std::fmt::Display) -> Self {
        Self::Upstream(err.to_string())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::MethodNotFound(_) => METHOD_NOT_FOUND,
            Self::InvalidParams(_) | Self::UnknownTool(_) | Self::UnknownPrompt(_) => INVALID_PARAMS,
            Self::Upstream(_) | Self::Internal(_) => INTERNAL_ERROR,
        }
    }

    fn data(&self) -> Option<serde_json::Value> {
        match self {
            Self::MethodNotFound(method) => Some(json!({ "method": method })),
            Self::InvalidParams(detail) => Some(json!({ "detail": detail })),
            _ => None,
        }
    }

    pub fn into_response(self, id: Option<serde_json::Value>) -> RpcResp {
        if let Self::Internal(detail) = &self {
            tracing::error!(error = %detail, "request failed with internal error");
        }
        mcp::err(id, self.code(), self.to_string(), self.data())
    }
}

impl From<serde_json::Error> for McpError {
    fn from(e: serde_json::Error) -> Self {
        McpError::Internal(e.to_string())
    }
}
