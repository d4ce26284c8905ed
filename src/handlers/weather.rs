// src/handlers/weather.rs
// Current-weather lookup via OpenWeatherMap, formatted as one sentence.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("network error: {0}")]
    Network(reqwest::Error),

    #[error("weather service returned HTTP {0}")]
    Status(StatusCode),

    #[error("unexpected weather service failure: {0}")]
    Unexpected(String),
}

/// Reply shape for the current-weather endpoint; every field the formatter
/// reads is optional and defaulted independently.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherReport {
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    #[serde(default)]
    pub main: MainReadings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherCondition {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MainReadings {
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub feels_like: Option<f64>,
}

/// Weather data collaborator: location in (metric units), report out.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, location: &str) -> Result<WeatherReport, WeatherError>;
}

pub struct OpenWeatherClient {
    http: Client,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("carmind/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(WeatherError::Network)?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, location: &str) -> Result<WeatherReport, WeatherError> {
        let response = self
            .http
            .get(API_URL)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(WeatherError::Network)?;

        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status()));
        }

        response
            .json()
            .await
            .map_err(|err| WeatherError::Unexpected(err.to_string()))
    }
}

pub struct WeatherHandler {
    provider: Arc<dyn WeatherProvider>,
    default_city: String,
}

impl WeatherHandler {
    pub fn new(provider: Arc<dyn WeatherProvider>, default_city: impl Into<String>) -> Self {
        Self {
            provider,
            default_city: default_city.into(),
        }
    }

    /// Never fails: every fault maps to a fixed user-facing string. The fetch
    /// always runs with a non-empty city name.
    pub async fn get_weather(&self, location: Option<&str>) -> String {
        let location = match location {
            Some(loc) if !loc.trim().is_empty() => loc,
            _ => {
                info!("No location provided, defaulting to {}", self.default_city);
                self.default_city.as_str()
            }
        };

        info!("Fetching current weather for '{}'", location);
        match self.provider.current_weather(location).await {
            Ok(report) => format_report(location, &report),
            Err(WeatherError::Status(code)) if code == StatusCode::UNAUTHORIZED => {
                warn!("Weather lookup rejected: invalid API key");
                "Error: Invalid API Key. Please check your OpenWeatherMap API key.".to_string()
            }
            Err(WeatherError::Status(code)) if code == StatusCode::NOT_FOUND => {
                warn!("Weather lookup failed: city '{}' not found", location);
                format!("Error: The city '{}' could not be found.", location)
            }
            Err(WeatherError::Status(code)) => {
                warn!("Weather service returned HTTP {}", code);
                "Sorry, I couldn't fetch the weather right now.".to_string()
            }
            Err(WeatherError::Network(err)) => {
                warn!("Weather service network error: {}", err);
                "Sorry, I'm having trouble connecting to the weather service.".to_string()
            }
            Err(WeatherError::Unexpected(err)) => {
                warn!("Unexpected weather failure: {}", err);
                "Sorry, an unexpected error occurred while fetching the weather.".to_string()
            }
        }
    }
}

fn format_report(location: &str, report: &WeatherReport) -> String {
    let description = report
        .weather
        .first()
        .and_then(|c| c.description.as_deref())
        .map(capitalize)
        .unwrap_or_else(|| "N/A".to_string());
    let temp = report
        .main
        .temp
        .map(|t| t.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let feels_like = report
        .main
        .feels_like
        .map(|t| t.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "Currently in {}, it is {}°C and the sky is: {}. It feels like {}°C.",
        location, temp, description, feels_like
    )
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
