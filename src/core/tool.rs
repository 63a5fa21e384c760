use serde::Serialize;

use crate::core::content::Content;

/// Catalog entry advertised by `tools/list`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: serde_json::Value,
}

/// Result payload of `tools/call`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl CallToolResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self { content: vec![Content::text(text)], is_error: None }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self { content: vec![Content::text(text)], is_error: Some(true) }
    }
}
