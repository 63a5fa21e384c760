use crate::clients::openweather::{WeatherError, WeatherProvider};
use crate::core::prompt::{GetPromptResult, PromptArgument, PromptDescriptor, PromptMessage};
use crate::core::request::GetPromptParams;
use crate::domain::format::format_weather;
use crate::domain::Units;

use super::fetch_all;

pub const NAME: &str = "weather-comparison";

pub fn descriptor() -> PromptDescriptor {
    PromptDescriptor {
        name: NAME,
        description: "Compare the current weather in two cities",
        arguments: vec![
            PromptArgument::required("city1", "First city to compare"),
            PromptArgument::required("city2", "Second city to compare"),
        ],
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonArgs {
    pub city1: String,
    pub city2: String,
}

impl ComparisonArgs {
    pub fn from_params(params: &GetPromptParams) -> Self {
        Self {
            city1: params.argument("city1").unwrap_or("London").to_string(),
            city2: params.argument("city2").unwrap_or("Paris").to_string(),
        }
    }
}

/// Both cities are fetched concurrently, in metric units.
pub async fn render(
    weather: &dyn WeatherProvider,
    args: ComparisonArgs,
) -> Result<GetPromptResult, WeatherError> {
    let cities = [args.city1.clone(), args.city2.clone()];
    let records = fetch_all(weather, &cities, Units::Metric).await?;

    let text = format!(
        "Please compare the current weather in these two cities:\n\
         \n\
         **{city1}:**\n\
         {first}\n\
         \n\
         **{city2}:**\n\
         {second}\n\
         \n\
         Include in your comparison:\n\
         1. Temperature and how it feels in each city\n\
         2. Which city has better conditions for outdoor activities\n\
         3. Differences in humidity, wind and visibility\n\
         4. What to wear in each city\n\
         5. An overall verdict on which city has the nicer weather today",
        city1 = args.city1,
        city2 = args.city2,
        first = format_weather(&records[0]),
        second = format_weather(&records[1]),
    );

    Ok(GetPromptResult {
        description: format!("Weather comparison between {} and {}", args.city1, args.city2),
        messages: vec![PromptMessage::user(text)],
    })
}
