//! Executor agent: sequential step dispatch with per-step failure isolation.

use anyhow::Result;
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::plan::{Plan, Step, StepResult, Tool, ToolOutcome};
use crate::io::tools::ToolSet;

/// Search result limit when a step omits `limit`.
pub const DEFAULT_SEARCH_LIMIT: u64 = 3;
/// Units when a weather step omits `units`.
pub const DEFAULT_UNITS: &str = "metric";

/// Run every step in plan order, one result per step. Never fails: a failed
/// step becomes an error result and execution continues.
pub fn execute<T: ToolSet>(tools: &T, plan: &Plan) -> Vec<StepResult> {
    plan.steps.iter().map(|step| run_step(tools, step)).collect()
}

fn run_step<T: ToolSet>(tools: &T, step: &Step) -> StepResult {
    let outcome = match &step.tool {
        Tool::Github => run_github(tools, &step.input),
        Tool::GithubSearch => run_github_search(tools, &step.input),
        Tool::Weather => run_weather(tools, &step.input),
        Tool::Other(name) => {
            debug!(step_id = step.step_id, tool = %name, "unknown tool");
            return StepResult::UnknownTool {
                step_id: step.step_id,
                error: format!("unknown tool {name}"),
            };
        }
    };
    let result = outcome.unwrap_or_else(|err| ToolOutcome::failure(format!("{err:#}")));
    StepResult::Completed {
        step_id: step.step_id,
        tool: step.tool.clone(),
        action: step.action.clone(),
        result,
    }
}

fn run_github<T: ToolSet>(tools: &T, input: &Map<String, Value>) -> Result<ToolOutcome> {
    let Some(repo_full_name) = str_param(input, "repo_full_name") else {
        return Ok(ToolOutcome::failure("missing repo_full_name"));
    };
    tools.repo_details(repo_full_name)
}

fn run_github_search<T: ToolSet>(tools: &T, input: &Map<String, Value>) -> Result<ToolOutcome> {
    let Some(query) = str_param(input, "query") else {
        return Ok(ToolOutcome::failure("missing query"));
    };
    let limit = input
        .get("limit")
        .and_then(Value::as_u64)
        .unwrap_or(DEFAULT_SEARCH_LIMIT);
    tools.search_repositories(query, limit)
}

fn run_weather<T: ToolSet>(tools: &T, input: &Map<String, Value>) -> Result<ToolOutcome> {
    let Some(city) = str_param(input, "city") else {
        return Ok(ToolOutcome::failure("missing city"));
    };
    let units = str_param(input, "units").unwrap_or(DEFAULT_UNITS);
    tools.current_weather(city, units)
}

/// Non-empty string parameter, or `None` when absent, empty, or not a string.
fn str_param<'a>(input: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    input
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}
