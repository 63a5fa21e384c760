use serde_json::Value;

use crate::core::mcp::{err as rpc_err, RpcReq, RpcResp, INVALID_REQUEST, PARSE_ERROR};

pub fn parse_error(message: impl Into<String>) -> RpcResp {
    rpc_err(None, PARSE_ERROR, "Parse error", Some(Value::String(message.into())))
}

pub fn invalid_request(id: Option<Value>, message: impl Into<String>) -> RpcResp {
    rpc_err(id, INVALID_REQUEST, "Invalid Request", Some(Value::String(message.into())))
}

/// Decode one raw envelope. On failure the error envelope to send back is
/// returned instead.
pub fn decode_request(body: &[u8]) -> Result<RpcReq, RpcResp> {
    let value: Value = serde_json::from_slice(body).map_err(|e| parse_error(e.to_string()))?;
    if !value.is_object() {
        return Err(invalid_request(None, "request must be a JSON object"));
    }
    let id = value.get("id").cloned();
    serde_json::from_value(value).map_err(|e| invalid_request(id, e.to_string()))
}
