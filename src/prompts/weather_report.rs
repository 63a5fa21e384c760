use crate::clients::openweather::{WeatherError, WeatherProvider};
use crate::core::error::McpError;
use crate::core::prompt::{GetPromptResult, PromptArgument, PromptDescriptor, PromptMessage};
use crate::core::request::GetPromptParams;
use crate::domain::format::format_weather;
use crate::domain::Units;

pub const NAME: &str = "weather-report";

pub fn descriptor() -> PromptDescriptor {
    PromptDescriptor {
        name: NAME,
        description: "Generate a detailed weather report with activity and clothing advice",
        arguments: vec![
            PromptArgument::required("city", "City to report on"),
            PromptArgument::optional("units", "Temperature units: metric (default) or imperial"),
        ],
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReportArgs {
    pub city: String,
    pub units: Units,
}

impl WeatherReportArgs {
    pub fn from_params(params: &GetPromptParams) -> Result<Self, McpError> {
        let units = params
            .argument("units")
            .map(str::parse::<Units>)
            .transpose()
            .map_err(McpError::invalid_params)?
            .unwrap_or_default();
        Ok(Self {
            city: params.argument("city").unwrap_or("London").to_string(),
            units,
        })
    }
}

pub async fn render(
    weather: &dyn WeatherProvider,
    args: WeatherReportArgs,
) -> Result<GetPromptResult, WeatherError> {
    let record = weather.fetch(&args.city, args.units).await?;
    let text = format!(
        "Please analyze the following current weather conditions and write a detailed weather report.\n\
         \n\
         {conditions}\n\
         \n\
         Structure the report as follows:\n\
         1. Current conditions summary\n\
         2. Comfort analysis (how the temperature, humidity and wind will feel)\n\
         3. Recommended activities for these conditions\n\
         4. What to wear\n\
         5. Weather alerts or precautions worth mentioning",
        conditions = format_weather(&record),
    );

    Ok(GetPromptResult {
        description: format!("Weather report for {}", args.city),
        messages: vec![PromptMessage::user(text)],
    })
}
