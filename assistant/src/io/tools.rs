//! Outbound tool surface used by the executor.
//!
//! The [`ToolSet`] trait decouples step dispatch from the HTTP adapters.
//! Tests use scripted tool sets that return canned outcomes. `Ok` carries
//! both success and expected in-band failures; `Err` means the retry policy
//! exhausted its attempts and the executor converts it to an error result.

use anyhow::Result;

use crate::core::plan::ToolOutcome;
use crate::io::config::Config;
use crate::io::github::GithubClient;
use crate::io::weather::WeatherClient;

pub trait ToolSet {
    fn repo_details(&self, repo_full_name: &str) -> Result<ToolOutcome>;
    fn search_repositories(&self, query: &str, limit: u64) -> Result<ToolOutcome>;
    fn current_weather(&self, city: &str, units: &str) -> Result<ToolOutcome>;
}

/// Live adapters backed by the GitHub and OpenWeather APIs.
pub struct LiveToolSet {
    github: GithubClient,
    weather: WeatherClient,
}

impl LiveToolSet {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            github: GithubClient::new(&config.github)?,
            weather: WeatherClient::new(&config.weather)?,
        })
    }
}

impl ToolSet for LiveToolSet {
    fn repo_details(&self, repo_full_name: &str) -> Result<ToolOutcome> {
        self.github.repo_details(repo_full_name)
    }

    fn search_repositories(&self, query: &str, limit: u64) -> Result<ToolOutcome> {
        self.github.search_repositories(query, limit)
    }

    fn current_weather(&self, city: &str, units: &str) -> Result<ToolOutcome> {
        self.weather.current_weather(city, units)
    }
}
