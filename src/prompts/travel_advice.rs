use crate::clients::openweather::{WeatherError, WeatherProvider};
use crate::core::error::McpError;
use crate::core::prompt::{GetPromptResult, PromptArgument, PromptDescriptor, PromptMessage};
use crate::core::request::GetPromptParams;
use crate::domain::format::format_weather;
use crate::domain::Units;

use super::fetch_all;

pub const NAME: &str = "travel-weather-advice";

pub fn descriptor() -> PromptDescriptor {
    PromptDescriptor {
        name: NAME,
        description: "Get travel advice based on the current weather at one or more destinations",
        arguments: vec![
            PromptArgument::required("cities", "Comma-separated list of destination cities"),
            PromptArgument::optional("travel_date", "When you plan to travel (defaults to today)"),
        ],
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TravelAdviceArgs {
    pub cities: Vec<String>,
    pub travel_date: String,
}

impl TravelAdviceArgs {
    pub fn from_params(params: &GetPromptParams) -> Result<Self, McpError> {
        let cities: Vec<String> = params
            .argument("cities")
            .unwrap_or("London,Paris")
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();
        if cities.is_empty() {
            return Err(McpError::invalid_params("cities must name at least one city"));
        }
        Ok(Self {
            cities,
            travel_date: params.argument("travel_date").unwrap_or("today").to_string(),
        })
    }
}

/// Conditions are always fetched in metric units.
pub async fn render(
    weather: &dyn WeatherProvider,
    args: TravelAdviceArgs,
) -> Result<GetPromptResult, WeatherError> {
    let records = fetch_all(weather, &args.cities, Units::Metric).await?;
    let conditions = records.iter().map(format_weather).collect::<Vec<_>>().join("\n\n");
    let destinations = args.cities.join(", ");

    let text = format!(
        "I'm planning to travel to {destinations} on {date}. Here is the current weather at each destination:\n\
         \n\
         {conditions}\n\
         \n\
         Please give me travel advice covering:\n\
         1. A packing list suited to these conditions\n\
         2. Which destination has the most pleasant weather right now\n\
         3. Outdoor and indoor activity suggestions for each destination\n\
         4. Possible weather-related travel disruptions\n\
         5. An overall recommendation for the trip",
        date = args.travel_date,
    );

    Ok(GetPromptResult {
        description: format!("Travel weather advice for {destinations}"),
        messages: vec![PromptMessage::user(text)],
    })
}
