//! Typed request shapes, one variant per supported method.
//!
//! Parameters are validated here, at the routing boundary, so handlers never
//! see an untyped bag.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value as J};

use crate::core::error::McpError;
use crate::core::mcp::InitializeParams;

#[derive(Debug, Clone)]
pub enum McpRequest {
    Initialize(InitializeParams),
    ListTools,
    CallTool(CallToolParams),
    ListPrompts,
    GetPrompt(GetPromptParams),
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Map<String, J>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetPromptParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<HashMap<String, String>>,
}

impl McpRequest {
    pub fn parse(method: &str, params: Option<J>) -> Result<Self, McpError> {
        match method {
            "initialize" => Ok(Self::Initialize(decode(params)?)),
            "tools/list" => Ok(Self::ListTools),
            "tools/call" => Ok(Self::CallTool(decode(params)?)),
            "prompts/list" => Ok(Self::ListPrompts),
            "prompts/get" => Ok(Self::GetPrompt(decode(params)?)),
            other => Err(McpError::MethodNotFound(other.to_string())),
        }
    }
}

impl CallToolParams {
    pub fn arguments_value(&self) -> J {
        J::Object(self.arguments.clone().unwrap_or_default())
    }
}

impl GetPromptParams {
    /// Argument value, with blank strings treated as absent.
    pub fn argument(&self, key: &str) -> Option<&str> {
        self.arguments
            .as_ref()
            .and_then(|args| args.get(key))
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

fn decode<T: DeserializeOwned>(params: Option<J>) -> Result<T, McpError> {
    let params = match params {
        None | Some(J::Null) => J::Object(Map::new()),
        Some(p) => p,
    };
    serde_json::from_value(params).map_err(|e| McpError::invalid_params(e.to_string()))
}
