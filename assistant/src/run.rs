//! End-to-end orchestration of a single task: plan, execute, verify.

use serde_json::Value;
use tracing::info;

use crate::agents::{executor, planner, verifier};
use crate::core::plan::{Plan, StepResult, Tool};
use crate::io::llm::LlmClient;
use crate::io::tools::ToolSet;

/// Inputs for one invocation, as resolved by the CLI.
#[derive(Debug, Clone)]
pub struct TaskRequest {
    pub task: String,
    pub location: Option<String>,
    pub units: String,
}

/// Everything one invocation produces, in pipeline order.
#[derive(Debug, Clone)]
pub struct TaskOutput {
    pub plan: Plan,
    pub results: Vec<StepResult>,
    pub report: String,
}

/// Drive the full pipeline. Tool failures are data inside `results`; this
/// function itself cannot fail.
pub fn run_task<L: LlmClient, T: ToolSet>(llm: &L, tools: &T, request: &TaskRequest) -> TaskOutput {
    let mut plan = planner::create_plan(llm, &request.task, request.location.as_deref());
    apply_units_override(&mut plan, &request.units);
    info!(steps = plan.steps.len(), "plan ready");

    let results = executor::execute(tools, &plan);
    info!(results = results.len(), "execution finished");

    let report = verifier::verify(llm, &request.task, &plan, &results);
    TaskOutput {
        plan,
        results,
        report,
    }
}

/// Units chosen on the command line override whatever the planner emitted on
/// weather steps.
pub fn apply_units_override(plan: &mut Plan, units: &str) {
    for step in &mut plan.steps {
        if step.tool == Tool::Weather {
            step.input
                .insert("units".to_string(), Value::String(units.to_string()));
        }
    }
}
