//! OpenWeather adapter for current conditions.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use tracing::debug;

use crate::core::plan::{ToolOutcome, WeatherReport};
use crate::io::config::{TOOL_TIMEOUT_SECS, WeatherConfig};
use crate::io::retry::with_retries;

/// Statuses that end the retry loop. OpenWeather does not use 403, so the
/// set differs from the GitHub adapter's.
const TERMINAL_STATUSES: [u16; 4] = [200, 400, 401, 404];

pub struct WeatherClient {
    config: WeatherConfig,
    client: Client,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TOOL_TIMEOUT_SECS))
            .build()
            .context("build weather http client")?;
        Ok(Self {
            config: config.clone(),
            client,
        })
    }

    /// Fetch current weather for a city. A missing credential is an in-band
    /// error result, not a crash.
    pub fn current_weather(&self, city: &str, units: &str) -> Result<ToolOutcome> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Ok(ToolOutcome::failure("OPENWEATHER_API_KEY not set"));
        };
        let url = format!("{}/weather", self.config.base_url);
        debug!(city, units, "fetching current weather");
        let response = with_retries(
            |response: &Response| TERMINAL_STATUSES.contains(&response.status().as_u16()),
            || {
                self.client
                    .get(&url)
                    .query(&[("q", city), ("appid", api_key), ("units", units)])
                    .send()
                    .context("send weather request")
            },
        )?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let details = response.text().unwrap_or_default();
            return Ok(ToolOutcome::failure_with_details(
                format!("OpenWeather returned {status}"),
                details,
            ));
        }
        let raw: RawWeather = response.json().context("parse weather response")?;
        Ok(ToolOutcome::Weather(raw.into_report(units)))
    }
}

#[derive(serde::Deserialize)]
struct RawWeather {
    name: String,
    main: RawMain,
    #[serde(default)]
    weather: Vec<RawCondition>,
}

#[derive(serde::Deserialize)]
struct RawMain {
    temp: f64,
    feels_like: f64,
    humidity: u64,
}

#[derive(serde::Deserialize)]
struct RawCondition {
    description: Option<String>,
}

impl RawWeather {
    fn into_report(self, units: &str) -> WeatherReport {
        let conditions = self
            .weather
            .into_iter()
            .next()
            .and_then(|condition| condition.description);
        WeatherReport {
            city: self.name,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            humidity: self.main.humidity,
            conditions,
            units: units.to_string(),
        }
    }
}
