//! Planner agent: LLM delegation with a deterministic heuristic fallback.

use serde_json::Value;
use tracing::debug;

use crate::core::heuristics::fallback_plan;
use crate::core::plan::Plan;
use crate::io::llm::{LlmClient, LlmError};
use crate::io::prompt::planner_prompt;

/// Recognized delegation failures. Any of these falls back to the heuristic
/// planner; anything outside this set is a programmer error and cannot occur
/// on this path.
#[derive(Debug, thiserror::Error)]
enum DelegationError {
    #[error("render planner prompt: {0}")]
    Prompt(#[from] minijinja::Error),
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error("plan is not valid json: {0}")]
    NotJson(serde_json::Error),
    #[error("plan json is not an object")]
    NotAnObject,
    #[error("plan json missing steps")]
    MissingSteps,
    #[error("plan does not match expected shape: {0}")]
    Shape(serde_json::Error),
}

/// Produce a plan for the task. Never fails: on any recognized delegation
/// failure the heuristic fallback runs with identical arguments.
pub fn create_plan<L: LlmClient>(llm: &L, task: &str, location: Option<&str>) -> Plan {
    match delegate(llm, task, location) {
        Ok(plan) => plan,
        Err(err) => {
            debug!(error = %err, "plan delegation failed, using heuristic fallback");
            fallback_plan(task, location)
        }
    }
}

fn delegate<L: LlmClient>(
    llm: &L,
    task: &str,
    location: Option<&str>,
) -> Result<Plan, DelegationError> {
    let prompt = planner_prompt(task, location)?;
    let response = llm.chat(&prompt)?;
    parse_plan(&response)
}

fn parse_plan(response: &str) -> Result<Plan, DelegationError> {
    let value: Value = serde_json::from_str(response).map_err(DelegationError::NotJson)?;
    let Some(object) = value.as_object() else {
        return Err(DelegationError::NotAnObject);
    };
    if !object.contains_key("steps") {
        return Err(DelegationError::MissingSteps);
    }
    serde_json::from_value(value).map_err(DelegationError::Shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::plan::Tool;
    use crate::test_support::ScriptedLlm;

    #[test]
    fn valid_delegated_plan_is_used_as_is() {
        let llm = ScriptedLlm::replies(
            r#"{"steps": [{"step_id": 7, "action": "look up repo", "tool": "github",
                "input": {"repo_full_name": "octocat/Hello-World"}}]}"#,
        );
        let plan = create_plan(&llm, "show me octocat/Hello-World", None);
        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.steps[0].step_id, 7);
        assert_eq!(plan.steps[0].tool, Tool::Github);
    }

    #[test]
    fn prompt_carries_task_and_location() {
        let llm = ScriptedLlm::replies(r#"{"steps": []}"#);
        create_plan(&llm, "weather in Lima", Some("Lima"));
        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Task: weather in Lima"));
        assert!(prompts[0].contains("Location: Lima"));
    }

    #[test]
    fn llm_failure_falls_back_to_heuristics() {
        let llm = ScriptedLlm::fails();
        let plan = create_plan(&llm, "What's the weather in Paris", None);
        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.steps[0].tool, Tool::Weather);
    }

    #[test]
    fn non_json_reply_falls_back() {
        let llm = ScriptedLlm::replies("Here is your plan: search GitHub.");
        let plan = create_plan(&llm, "top 3 python repositories", None);
        assert_eq!(plan.steps[0].tool, Tool::GithubSearch);
        assert_eq!(plan.steps[0].input["query"], "language:Python");
    }

    #[test]
    fn json_without_steps_key_falls_back() {
        let llm = ScriptedLlm::replies(r#"{"plan": []}"#);
        let plan = create_plan(&llm, "tell me a joke", None);
        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.steps[0].input["query"], "tell me a joke");
    }

    #[test]
    fn non_object_json_falls_back() {
        let llm = ScriptedLlm::replies(r#"[1, 2, 3]"#);
        let plan = create_plan(&llm, "tell me a joke", None);
        assert_eq!(plan.steps.len(), 1);
    }

    #[test]
    fn malformed_steps_fall_back() {
        let llm = ScriptedLlm::replies(r#"{"steps": [{"tool": "weather"}]}"#);
        let plan = create_plan(&llm, "tell me a joke", None);
        assert_eq!(plan.steps[0].tool, Tool::GithubSearch);
    }
}
