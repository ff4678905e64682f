//! Process configuration resolved once at startup.
//!
//! Components receive their sub-config by reference; nothing reads the
//! environment after [`Config::from_env`] returns. The missing LLM credential
//! is the only fatal startup error — the weather credential is checked at
//! call time and the GitHub token is optional.

use std::env;

use anyhow::{Result, anyhow};

/// Per-request timeout for tool adapter calls, in seconds.
pub const TOOL_TIMEOUT_SECS: u64 = 10;

const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;
const DEFAULT_GITHUB_BASE_URL: &str = "https://api.github.com";
const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub github: GithubConfig,
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Absent token omits the Authorization header (unauthenticated limits).
    pub token: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Absent key yields a tool-level error result at call time.
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Config {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve configuration from an injectable name→value lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let api_key = get("OPENAI_API_KEY").ok_or_else(|| anyhow!("OPENAI_API_KEY missing"))?;
        Ok(Self {
            llm: LlmConfig {
                api_key,
                base_url: get("OPENAI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
                model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
                timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
            },
            github: GithubConfig {
                token: get("GITHUB_TOKEN"),
                base_url: get("GITHUB_API_URL")
                    .unwrap_or_else(|| DEFAULT_GITHUB_BASE_URL.to_string()),
            },
            weather: WeatherConfig {
                api_key: get("OPENWEATHER_API_KEY"),
                base_url: get("OPENWEATHER_API_URL")
                    .unwrap_or_else(|| DEFAULT_WEATHER_BASE_URL.to_string()),
            },
        })
    }
}
