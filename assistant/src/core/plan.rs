//! Shared plan and result types exchanged between the agents.
//!
//! These types define stable contracts between components. Plans are created
//! fresh per invocation and results are written once; nothing here is
//! persisted beyond process lifetime.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Capability named by a plan step.
///
/// Tool names compare case-sensitively and exactly. Anything outside the
/// known set is preserved as [`Tool::Other`] so the executor can report it
/// instead of dropping the step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tool {
    Github,
    GithubSearch,
    Weather,
    Other(String),
}

impl Tool {
    pub fn as_str(&self) -> &str {
        match self {
            Tool::Github => "github",
            Tool::GithubSearch => "github_search",
            Tool::Weather => "weather",
            Tool::Other(name) => name,
        }
    }
}

impl From<String> for Tool {
    fn from(name: String) -> Self {
        match name.as_str() {
            "github" => Tool::Github,
            "github_search" => Tool::GithubSearch,
            "weather" => Tool::Weather,
            _ => Tool::Other(name),
        }
    }
}

impl From<Tool> for String {
    fn from(tool: Tool) -> Self {
        tool.as_str().to_string()
    }
}

/// One unit of work naming a tool and its input parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Caller-assigned id, unique within a plan. Need not be contiguous.
    pub step_id: i64,
    /// Free-text description of the step.
    pub action: String,
    pub tool: Tool,
    /// Parameter name to value mapping for the tool invocation.
    #[serde(default)]
    pub input: Map<String, Value>,
}

/// Ordered list of steps produced by the planner.
///
/// Order is significant: steps execute in sequence order. A plan with zero
/// steps is valid and executes to an empty result sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub steps: Vec<Step>,
}

/// One record per executed step, in plan order.
///
/// Steps naming an unregistered tool produce a bare `{step_id, error}` record
/// with no `tool`/`action` keys, which keeps them distinguishable from tool
/// invocations that failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepResult {
    Completed {
        step_id: i64,
        tool: Tool,
        action: String,
        result: ToolOutcome,
    },
    UnknownTool {
        step_id: i64,
        error: String,
    },
}

impl StepResult {
    pub fn step_id(&self) -> i64 {
        match self {
            StepResult::Completed { step_id, .. } | StepResult::UnknownTool { step_id, .. } => {
                *step_id
            }
        }
    }
}

/// Success-or-error payload returned by a tool invocation. Never both.
///
/// Serializes untagged: each variant is exactly the payload mapping the tool
/// produced. [`ToolOutcome::Failure`] is listed first so error payloads win
/// when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolOutcome {
    Failure(ToolFailure),
    Repo(RepoDetails),
    Search(SearchResults),
    Weather(WeatherReport),
}

impl ToolOutcome {
    pub fn failure(error: impl Into<String>) -> Self {
        ToolOutcome::Failure(ToolFailure {
            error: error.into(),
            details: None,
        })
    }

    pub fn failure_with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        ToolOutcome::Failure(ToolFailure {
            error: error.into(),
            details: Some(details.into()),
        })
    }
}

/// In-band error payload: `{ error, details? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFailure {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Success payload of the `github` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoDetails {
    pub name: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub language: Option<String>,
    pub html_url: String,
}

/// Success payload of the `github_search` tool. Items arrive sorted by stars
/// descending upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchItem {
    pub name: String,
    pub stars: u64,
    pub html_url: String,
}

/// Success payload of the `weather` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u64,
    pub conditions: Option<String>,
    pub units: String,
}
