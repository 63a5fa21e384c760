//! Shared MCP protocol surface: JSON-RPC envelopes and the initialize handshake.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as J;

pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

// --- JSON-RPC structures shared by both transports ---

#[derive(Deserialize, Debug, Clone)]
pub struct RpcReq {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// `None` when the member is absent; an explicit `null` is `Some(Null)`.
    #[serde(default, deserialize_with = "present")]
    pub id: Option<J>,
    pub method: String,
    #[serde(default)]
    pub params: Option<J>,
}

impl RpcReq {
    pub fn new(id: Option<J>, method: impl Into<String>, params: Option<J>) -> Self {
        Self { jsonrpc: Some(JSONRPC_VERSION.into()), id, method: method.into(), params }
    }
}

/// Response envelope. `result` and `error` are mutually exclusive and an
/// absent request id stays absent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcResp {
    pub jsonrpc: String,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub id: Option<J>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<J>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErr>,
}

impl RpcResp {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcErr {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<J>,
}

// Keeps a present `null` distinct from an absent member.
fn present<'de, D: Deserializer<'de>>(d: D) -> Result<Option<J>, D::Error> {
    J::deserialize(d).map(Some)
}

pub fn ok(id: Option<J>, result: J) -> RpcResp {
    RpcResp { jsonrpc: JSONRPC_VERSION.into(), id, result: Some(result), error: None }
}

pub fn err(id: Option<J>, code: i32, msg: impl Into<String>, data: Option<J>) -> RpcResp {
    RpcResp {
        jsonrpc: JSONRPC_VERSION.into(),
        id,
        result: None,
        error: Some(RpcErr { code, message: msg.into(), data }),
    }
}

// --- Initialize handshake ---

/// Client half of `initialize`. Every field is optional: the server always
/// answers with its own fixed protocol version.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    #[serde(default)]
    pub protocol_version: Option<String>,
    #[serde(default)]
    pub capabilities: Option<J>,
    #[serde(default)]
    pub client_info: Option<Implementation>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: Implementation,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ServerCapabilities {
    pub tools: J,
    pub prompts: J,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Implementation {
    pub name: String,
    #[serde(default)]
    pub version: String,
}

impl InitializeResult {
    pub fn for_this_server() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.into(),
            capabilities: ServerCapabilities {
                tools: J::Object(Default::default()),
                prompts: J::Object(Default::default()),
            },
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").into(),
                version: env!("CARGO_PKG_VERSION").into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_serializes_initialize_result() {
        let v = serde_json::to_value(InitializeResult::for_this_server()).unwrap();
        assert_eq!(v["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(v["serverInfo"]["name"], "weather-mcp-gateway");
        assert_eq!(v["capabilities"], json!({"tools": {}, "prompts": {}}));
    }

    #[test]
    fn absent_id_is_not_serialized() {
        let s = serde_json::to_string(&ok(None, json!({}))).unwrap();
        assert!(!s.contains("\"id\""));
        let s = serde_json::to_string(&err(Some(json!("abc")), METHOD_NOT_FOUND, "nope", None)).unwrap();
        assert!(s.contains("\"id\":\"abc\""));
        assert!(!s.contains("\"result\""));
    }

    #[test]
    fn request_tolerates_missing_optional_fields() {
        let r: RpcReq = serde_json::from_value(json!({"method": "tools/list"})).unwrap();
        assert!(r.id.is_none());
        assert!(r.params.is_none());
        assert!(r.jsonrpc.is_none());
    }

    #[test]
    fn null_id_is_kept_and_echoed() {
        let r: RpcReq = serde_json::from_value(json!({"id": null, "method": "tools/list"})).unwrap();
        assert_eq!(r.id, Some(J::Null));
        let s = serde_json::to_string(&ok(r.id, json!({}))).unwrap();
        assert!(s.contains("\"id\":null"));
    }
}
