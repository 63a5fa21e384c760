//! Prompt generators.
//!
//! Each prompt fetches live weather and embeds the formatted conditions in a
//! five-part instruction template.
//!
//! - `weather_report` - single-city analysis
//! - `travel_advice` - any number of cities, fetched concurrently
//! - `comparison` - two cities side by side, fetched concurrently

use futures::future::join_all;
use once_cell::sync::Lazy;

use crate::clients::openweather::{WeatherError, WeatherProvider};
use crate::core::error::McpError;
use crate::core::prompt::{GetPromptResult, PromptDescriptor};
use crate::core::request::GetPromptParams;
use crate::domain::{Units, WeatherRecord};

pub mod comparison;
pub mod travel_advice;
pub mod weather_report;

pub use comparison::ComparisonArgs;
pub use travel_advice::TravelAdviceArgs;
pub use weather_report::WeatherReportArgs;

/// The process-wide prompt catalog, built once.
pub static PROMPT_CATALOG: Lazy<Vec<PromptDescriptor>> = Lazy::new(|| {
    vec![
        weather_report::descriptor(),
        travel_advice::descriptor(),
        comparison::descriptor(),
    ]
});

/// A validated `prompts/get` request.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptCall {
    WeatherReport(WeatherReportArgs),
    TravelWeatherAdvice(TravelAdviceArgs),
    WeatherComparison(ComparisonArgs),
}

impl PromptCall {
    pub fn parse(params: &GetPromptParams) -> Result<Self, McpError> {
        match params.name.as_str() {
            weather_report::NAME => WeatherReportArgs::from_params(params).map(Self::WeatherReport),
            travel_advice::NAME => TravelAdviceArgs::from_params(params).map(Self::TravelWeatherAdvice),
            comparison::NAME => Ok(Self::WeatherComparison(ComparisonArgs::from_params(params))),
            other => Err(McpError::UnknownPrompt(other.to_string())),
        }
    }

    pub async fn render(self, weather: &dyn WeatherProvider) -> Result<GetPromptResult, McpError> {
        let rendered = match self {
            Self::WeatherReport(args) => weather_report::render(weather, args).await,
            Self::TravelWeatherAdvice(args) => travel_advice::render(weather, args).await,
            Self::WeatherComparison(args) => comparison::render(weather, args).await,
        };
        rendered.map_err(McpError::upstream)
    }
}

/// Fetch every city concurrently and wait for all of them. The first failure
/// in city order fails the whole batch; nothing in flight is cancelled.
pub(crate) async fn fetch_all(
    weather: &dyn WeatherProvider,
    cities: &[String],
    units: Units,
) -> Result<Vec<WeatherRecord>, WeatherError> {
    join_all(cities.iter().map(|city| weather.fetch(city, units)))
        .await
        .into_iter()
        .collect()
}
