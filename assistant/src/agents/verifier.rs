//! Verifier agent: LLM-written report with a deterministic fallback.

use tracing::debug;

use crate::core::plan::{Plan, StepResult};
use crate::core::report::fallback_report;
use crate::io::llm::{LlmClient, LlmError};
use crate::io::prompt::verifier_prompt;

/// Recognized delegation failures on the verification path.
#[derive(Debug, thiserror::Error)]
enum VerifyError {
    #[error("render verifier prompt: {0}")]
    Prompt(#[from] minijinja::Error),
    #[error("encode structured data: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Produce the final report. Never fails: on any recognized delegation
/// failure the deterministic aggregation over `results` is returned.
pub fn verify<L: LlmClient>(
    llm: &L,
    task: &str,
    plan: &Plan,
    results: &[StepResult],
) -> String {
    match delegate(llm, task, plan, results) {
        Ok(report) => report,
        Err(err) => {
            debug!(error = %err, "report delegation failed, using deterministic aggregation");
            fallback_report(results)
        }
    }
}

fn delegate<L: LlmClient>(
    llm: &L,
    task: &str,
    plan: &Plan,
    results: &[StepResult],
) -> Result<String, VerifyError> {
    let plan_json = serde_json::to_string(plan)?;
    let results_json = serde_json::to_string(results)?;
    let prompt = verifier_prompt(task, &plan_json, &results_json)?;
    Ok(llm.chat(&prompt)?)
}
