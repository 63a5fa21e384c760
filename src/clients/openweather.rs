use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Units, WeatherRecord};
use crate::infra::config::Config;
use crate::infra::http::headers::tag_upstream;
use crate::infra::logging::{count, log_metric};
use crate::infra::runtime::limits::make_http_client;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City name is required")]
    EmptyCity,
    #[error("City \"{0}\" not found")]
    CityNotFound(String),
    #[error("Invalid API key")]
    InvalidApiKey,
    #[error("Weather service error: {0}")]
    Upstream(String),
    /// Transport or decode failure. The request URL carries the API key, so
    /// it is stripped on conversion.
    #[error("Weather request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        WeatherError::Request(e.without_url())
    }
}

impl WeatherError {
    pub fn kind(&self) -> &'static str {
        match self {
            WeatherError::EmptyCity => "empty_city",
            WeatherError::CityNotFound(_) => "not_found",
            WeatherError::InvalidApiKey => "invalid_api_key",
            WeatherError::Upstream(_) => "upstream",
            WeatherError::Request(_) => "request",
        }
    }
}

/// Source of current weather conditions.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch(&self, city: &str, units: Units) -> Result<WeatherRecord, WeatherError>;
}

/// OpenWeatherMap client. Without an API key it serves deterministic mock data.
#[derive(Clone)]
pub struct OpenWeatherClient {
    base: String,
    api_key: Option<String>,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(base: impl Into<String>, api_key: Option<String>) -> Result<Self, WeatherError> {
        Ok(Self {
            base: base.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            http: make_http_client()?,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, WeatherError> {
        Self::new(cfg.weather_base_url.clone(), cfg.api_key.clone())
    }

    pub fn is_mock(&self) -> bool {
        self.api_key.is_none()
    }

    async fn fetch_remote(&self, city: &str, units: Units, key: &str) -> Result<WeatherRecord, WeatherError> {
        let url = format!("{}/weather", self.base.trim_end_matches('/'));
        tracing::debug!(endpoint = %url, city = city, units = %units, "openweather request");
        let (builder, rid) = tag_upstream(self.http.get(url), None);
        let resp = builder
            .query(&[("q", city), ("appid", key), ("units", units.as_str())])
            .send()
            .await?;

        match resp.status() {
            s if s.is_success() => {}
            StatusCode::NOT_FOUND => return Err(WeatherError::CityNotFound(city.to_string())),
            StatusCode::UNAUTHORIZED => return Err(WeatherError::InvalidApiKey),
            s => {
                tracing::warn!(status = %s, request_id = %rid, "openweather returned error status");
                return Err(WeatherError::Upstream(format!("upstream status {s}")));
            }
        }

        let wire = resp.json::<CurrentWire>().await?;
        Ok(wire.into_record(units))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch(&self, city: &str, units: Units) -> Result<WeatherRecord, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::EmptyCity);
        }

        let Some(key) = self.api_key.as_deref() else {
            tracing::debug!(city = city, "no API key configured; serving mock weather");
            return Ok(mock_record(city, units));
        };

        let start = Instant::now();
        let res = self.fetch_remote(city, units, key).await;
        match &res {
            Ok(_) => log_metric("weather.fetch", "remote_latency_ms", start.elapsed().as_millis() as f64),
            Err(e) => {
                count("weather_fetch_errors_total", e.kind());
                tracing::warn!(city = city, error = %e, "weather fetch failed");
            }
        }
        res
    }
}

/// Fixed conditions used when no credential is configured.
pub fn mock_record(city: &str, units: Units) -> WeatherRecord {
    let (temperature, feels_like, wind_speed) = match units {
        Units::Metric => (22.0, 24.0, 3.5),
        Units::Imperial => (72.0, 75.0, 7.8),
    };
    WeatherRecord {
        city: city.to_string(),
        country: "XX".into(),
        temperature,
        feels_like,
        humidity: 65,
        pressure: 1013,
        description: "partly cloudy".into(),
        wind_speed,
        wind_deg: 225,
        visibility: 10_000,
        units,
        timestamp: Utc::now(),
    }
}

// Subset of the OpenWeatherMap "current weather" payload we rely on.
#[derive(Deserialize)]
struct CurrentWire {
    name: String,
    #[serde(default)]
    sys: SysWire,
    main: MainWire,
    #[serde(default)]
    weather: Vec<ConditionWire>,
    #[serde(default)]
    wind: WindWire,
    #[serde(default)]
    visibility: u32,
    #[serde(default)]
    dt: Option<i64>,
}

#[derive(Deserialize, Default)]
struct SysWire {
    #[serde(default)]
    country: String,
}

#[derive(Deserialize)]
struct MainWire {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Deserialize)]
struct ConditionWire {
    description: String,
}

#[derive(Deserialize, Default)]
struct WindWire {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: u16,
}

impl CurrentWire {
    fn into_record(self, units: Units) -> WeatherRecord {
        let timestamp = self
            .dt
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .unwrap_or_else(Utc::now);
        WeatherRecord {
            city: self.name,
            country: self.sys.country,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            description: self
                .weather
                .into_iter()
                .next()
                .map(|c| c.description)
                .unwrap_or_else(|| "unknown".into()),
            wind_speed: self.wind.speed,
            wind_deg: self.wind.deg,
            visibility: self.visibility,
            units,
            timestamp,
        }
    }
}
