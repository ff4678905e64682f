//! Shared scripted fakes for agent and pipeline tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use anyhow::{Result, anyhow};

use crate::core::plan::{
    RepoDetails, SearchItem, SearchResults, ToolOutcome, WeatherReport,
};
use crate::io::llm::{LlmClient, LlmError};
use crate::io::tools::ToolSet;

/// LLM stub that pops canned replies in order and records every prompt.
/// An exhausted queue (or [`ScriptedLlm::fails`]) yields an HTTP error.
pub struct ScriptedLlm {
    replies: RefCell<VecDeque<String>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedLlm {
    pub fn replies(reply: &str) -> Self {
        Self::queue(vec![reply])
    }

    pub fn queue(replies: Vec<&str>) -> Self {
        Self {
            replies: RefCell::new(replies.into_iter().map(str::to_string).collect()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn fails() -> Self {
        Self::queue(Vec::new())
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl LlmClient for ScriptedLlm {
    fn chat(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.replies
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| LlmError::Http("scripted failure".to_string()))
    }
}

/// Tool set stub returning canned outcomes and recording calls as
/// `tool:args` strings.
pub struct ScriptedTools {
    repo: Result<ToolOutcome, String>,
    search: Result<ToolOutcome, String>,
    weather: Result<ToolOutcome, String>,
    calls: RefCell<Vec<String>>,
}

impl Default for ScriptedTools {
    fn default() -> Self {
        Self {
            repo: Ok(sample_repo()),
            search: Ok(sample_search()),
            weather: Ok(sample_weather()),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl ScriptedTools {
    pub fn with_repo(mut self, repo: Result<ToolOutcome, &str>) -> Self {
        self.repo = repo.map_err(str::to_string);
        self
    }

    pub fn with_search(mut self, search: Result<ToolOutcome, &str>) -> Self {
        self.search = search.map_err(str::to_string);
        self
    }

    pub fn with_weather(mut self, weather: Result<ToolOutcome, &str>) -> Self {
        self.weather = weather.map_err(str::to_string);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl ToolSet for ScriptedTools {
    fn repo_details(&self, repo_full_name: &str) -> Result<ToolOutcome> {
        self.record(format!("github:{repo_full_name}"));
        clone_outcome(&self.repo)
    }

    fn search_repositories(&self, query: &str, limit: u64) -> Result<ToolOutcome> {
        self.record(format!("github_search:{query}:{limit}"));
        clone_outcome(&self.search)
    }

    fn current_weather(&self, city: &str, units: &str) -> Result<ToolOutcome> {
        self.record(format!("weather:{city}:{units}"));
        clone_outcome(&self.weather)
    }
}

fn clone_outcome(outcome: &Result<ToolOutcome, String>) -> Result<ToolOutcome> {
    match outcome {
        Ok(value) => Ok(value.clone()),
        Err(message) => Err(anyhow!("{message}")),
    }
}

pub fn sample_repo() -> ToolOutcome {
    ToolOutcome::Repo(RepoDetails {
        name: "octocat/Hello-World".to_string(),
        description: Some("My first repository".to_string()),
        stars: 3,
        forks: 2,
        open_issues: 1,
        language: Some("C".to_string()),
        html_url: "https://github.com/octocat/Hello-World".to_string(),
    })
}

pub fn sample_search() -> ToolOutcome {
    ToolOutcome::Search(SearchResults {
        items: vec![
            SearchItem {
                name: "rust-lang/rust".to_string(),
                stars: 100_000,
                html_url: "https://github.com/rust-lang/rust".to_string(),
            },
            SearchItem {
                name: "tokio-rs/tokio".to_string(),
                stars: 30_000,
                html_url: "https://github.com/tokio-rs/tokio".to_string(),
            },
        ],
    })
}

pub fn sample_weather() -> ToolOutcome {
    ToolOutcome::Weather(WeatherReport {
        city: "Paris".to_string(),
        temperature: 21.5,
        feels_like: 20.9,
        humidity: 40,
        conditions: Some("clear sky".to_string()),
        units: "metric".to_string(),
    })
}
