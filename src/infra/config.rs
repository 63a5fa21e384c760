use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: String, // "server" or "stdio"
    pub port: u16,
    /// Upstream credential; `None` selects mock weather data.
    pub api_key: Option<String>,
    pub weather_base_url: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid MODE: {0}. Must be 'server' or 'stdio'")]
    InvalidMode(String),
    #[error("PORT cannot be 0")]
    ZeroPort,
}

impl Config {
    pub fn from_env() -> Self {
        let mode = std::env::var("MODE").unwrap_or_else(|_| "server".into());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let api_key = std::env::var("OPENWEATHER_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let weather_base_url = std::env::var("OPENWEATHER_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_WEATHER_BASE_URL.into());

        Self {
            mode,
            port,
            api_key,
            weather_base_url,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.mode.as_str(), "server" | "stdio") {
            return Err(ConfigError::InvalidMode(self.mode.clone()));
        }
        if self.mode == "server" && self.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        Ok(())
    }

    pub fn is_stdio(&self) -> bool {
        self.mode == "stdio"
    }

    pub fn uses_mock_weather(&self) -> bool {
        self.api_key.is_none()
    }

    pub fn bind_socket(&self) -> SocketAddr {
        ([0, 0, 0, 0], self.port).into()
    }
}
