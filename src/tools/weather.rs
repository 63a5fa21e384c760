use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::json;

use crate::clients::openweather::WeatherProvider;
use crate::core::error::McpError;
use crate::core::request::CallToolParams;
use crate::core::tool::{CallToolResult, ToolDescriptor};
use crate::domain::format::format_weather;
use crate::domain::Units;

pub const GET_WEATHER: &str = "get-weather";

/// The process-wide tool catalog, built once.
pub static TOOL_CATALOG: Lazy<Vec<ToolDescriptor>> = Lazy::new(|| {
    vec![ToolDescriptor {
        name: GET_WEATHER,
        description: "Get current weather information for a city",
        input_schema: json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "City name (e.g. \"London\" or \"Paris,FR\")"
                },
                "units": {
                    "type": "string",
                    "enum": ["metric", "imperial"],
                    "description": "Temperature units",
                    "default": "metric"
                }
            },
            "required": ["city"]
        }),
    }]
});

#[derive(Debug, Clone, Deserialize)]
pub struct GetWeatherArgs {
    pub city: String,
    #[serde(default)]
    pub units: Units,
}

/// A validated `tools/call` request.
#[derive(Debug, Clone)]
pub enum ToolCall {
    GetWeather(GetWeatherArgs),
}

impl ToolCall {
    pub fn parse(params: CallToolParams) -> Result<Self, McpError> {
        match params.name.as_str() {
            GET_WEATHER => serde_json::from_value(params.arguments_value())
                .map(ToolCall::GetWeather)
                .map_err(|e| McpError::invalid_params(format!("{GET_WEATHER}: {e}"))),
            other => Err(McpError::UnknownTool(other.to_string())),
        }
    }

    /// Run the tool. Upstream failures come back as an `isError` result,
    /// not as a protocol error.
    pub async fn run(self, weather: &dyn WeatherProvider) -> CallToolResult {
        match self {
            ToolCall::GetWeather(args) => match weather.fetch(&args.city, args.units).await {
                Ok(record) => CallToolResult::success(format_weather(&record)),
                Err(e) => {
                    tracing::warn!(city = %args.city, error = %e, "get-weather failed");
                    CallToolResult::failure(format!("Error getting weather: {e}"))
                }
            },
        }
    }
}
