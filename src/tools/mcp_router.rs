//! Transport-agnostic MCP request router.
//!
//! `McpRouter::handle` is total: every request produces exactly one envelope
//! whose id mirrors the request, and no failure (including a panic inside a
//! handler) escapes to the transport.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::{json, Value as J};

use crate::clients::openweather::WeatherProvider;
use crate::core::error::McpError;
use crate::core::mcp::{self, InitializeResult, RpcReq, RpcResp, INTERNAL_ERROR};
use crate::core::request::McpRequest;
use crate::prompts::{PromptCall, PROMPT_CATALOG};
use crate::tools::weather::{ToolCall, TOOL_CATALOG};

#[derive(Clone)]
pub struct McpRouter {
    weather: Arc<dyn WeatherProvider>,
}

impl McpRouter {
    pub fn new(weather: Arc<dyn WeatherProvider>) -> Self {
        Self { weather }
    }

    pub async fn handle(&self, req: RpcReq) -> RpcResp {
        let RpcReq { id, method, params, .. } = req;

        let outcome = AssertUnwindSafe(self.dispatch(&method, params))
            .catch_unwind()
            .await;
        let resp = match outcome {
            Ok(Ok(result)) => mcp::ok(id.clone(), result),
            Ok(Err(e)) => e.into_response(id.clone()),
            Err(_) => {
                tracing::error!(method = %method, "handler panicked");
                mcp::err(id.clone(), INTERNAL_ERROR, "Internal error", None)
            }
        };

        tracing::info!(
            method = %method,
            id = ?id,
            outcome = if resp.is_error() { "failure" } else { "success" },
            "mcp request handled"
        );
        resp
    }

    async fn dispatch(&self, method: &str, params: Option<J>) -> Result<J, McpError> {
        match McpRequest::parse(method, params)? {
            McpRequest::Initialize(p) => {
                tracing::debug!(client_version = ?p.protocol_version, client = ?p.client_info, "initialize");
                Ok(serde_json::to_value(InitializeResult::for_this_server())?)
            }
            McpRequest::ListTools => Ok(json!({ "tools": &*TOOL_CATALOG })),
            McpRequest::CallTool(p) => {
                let call = ToolCall::parse(p)?;
                let result = call.run(self.weather.as_ref()).await;
                Ok(serde_json::to_value(result)?)
            }
            McpRequest::ListPrompts => Ok(json!({ "prompts": &*PROMPT_CATALOG })),
            McpRequest::GetPrompt(p) => {
                let call = PromptCall::parse(&p)?;
                let result = call.render(self.weather.as_ref()).await?;
                Ok(serde_json::to_value(result)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::openweather::{WeatherError, WeatherProvider};
    use crate::domain::{Units, WeatherRecord};
    use async_trait::async_trait;

    struct Panicking;

    #[async_trait]
    impl WeatherProvider for Panicking {
        async fn fetch(&self, _city: &str, _units: Units) -> Result<WeatherRecord, WeatherError> {
            panic!("provider exploded")
        }
    }

    struct Failing;

    #[async_trait]
    impl WeatherProvider for Failing {
        async fn fetch(&self, city: &str, _units: Units) -> Result<WeatherRecord, WeatherError> {
            Err(WeatherError::CityNotFound(city.to_string()))
        }
    }

    fn req(id: Option<J>, method: &str, params: J) -> RpcReq {
        RpcReq::new(id, method, Some(params))
    }

    #[tokio::test]
    async fn panic_in_handler_becomes_internal_error() {
        let router = McpRouter::new(Arc::new(Panicking));
        let resp = router
            .handle(req(
                Some(json!(9)),
                "tools/call",
                json!({"name": "get-weather", "arguments": {"city": "Oslo"}}),
            ))
            .await;
        assert_eq!(resp.id, Some(json!(9)));
        let err = resp.error.unwrap();
        assert_eq!(err.code, -32603);
        assert_eq!(err.message, "Internal error");

        // The router keeps serving after a failed request.
        let resp = router.handle(req(Some(json!(10)), "tools/list", json!({}))).await;
        assert!(resp.result.is_some());
    }

    #[tokio::test]
    async fn tool_upstream_failure_is_is_error_result() {
        let router = McpRouter::new(Arc::new(Failing));
        let resp = router
            .handle(req(
                Some(json!("a")),
                "tools/call",
                json!({"name": "get-weather", "arguments": {"city": "Atlantis"}}),
            ))
            .await;
        assert!(resp.error.is_none());
        let result = resp.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["content"][0]["text"], "Error getting weather: City \"Atlantis\" not found");
    }

    #[tokio::test]
    async fn prompt_upstream_failure_is_internal_error_with_message() {
        let router = McpRouter::new(Arc::new(Failing));
        let resp = router
            .handle(req(
                Some(json!(3)),
                "prompts/get",
                json!({"name": "weather-report", "arguments": {"city": "Atlantis"}}),
            ))
            .await;
        let err = resp.error.unwrap();
        assert_eq!(err.code, -32603);
        assert_eq!(err.message, "Error getting weather: City \"Atlantis\" not found");
    }

    #[tokio::test]
    async fn initialize_claims_fixed_version() {
        let router = McpRouter::new(Arc::new(Failing));
        let resp = router
            .handle(req(Some(json!(1)), "initialize", json!({"protocolVersion": "1999-01-01"})))
            .await;
        let result = resp.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert!(result["capabilities"].get("resources").is_none());
        assert!(result["capabilities"]["tools"].is_object());
        assert!(result["capabilities"]["prompts"].is_object());
    }
}
