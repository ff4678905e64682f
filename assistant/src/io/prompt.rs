//! Delegation prompt rendering.
//!
//! Templates live under `prompts/` and encode the same intent rules the
//! heuristic fallback implements, as guidance text. Fallback correctness
//! never depends on the collaborator obeying them.

use std::sync::LazyLock;

use minijinja::{Environment, context};

const PLANNER_TEMPLATE: &str = include_str!("prompts/planner.md");
const VERIFIER_TEMPLATE: &str = include_str!("prompts/verifier.md");

static ENGINE: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.add_template("planner", PLANNER_TEMPLATE)
        .expect("planner template should be valid");
    env.add_template("verifier", VERIFIER_TEMPLATE)
        .expect("verifier template should be valid");
    env
});

pub fn planner_prompt(task: &str, location: Option<&str>) -> Result<String, minijinja::Error> {
    let template = ENGINE.get_template("planner")?;
    template.render(context! { task => task, location => location })
}

pub fn verifier_prompt(
    task: &str,
    plan_json: &str,
    results_json: &str,
) -> Result<String, minijinja::Error> {
    let template = ENGINE.get_template("verifier")?;
    template.render(context! {
        task => task,
        plan_json => plan_json,
        results_json => results_json,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planner_prompt_embeds_task_and_location() {
        let prompt = planner_prompt("weather in Paris", Some("Paris")).expect("render");
        assert!(prompt.contains("Task: weather in Paris"));
        assert!(prompt.contains("Location: Paris"));
        assert!(prompt.contains("Output ONLY valid JSON."));
    }

    #[test]
    fn planner_prompt_marks_absent_location() {
        let prompt = planner_prompt("tell me a joke", None).expect("render");
        assert!(prompt.contains("Location: not provided"));
    }

    #[test]
    fn verifier_prompt_embeds_structured_data_and_sections() {
        let prompt =
            verifier_prompt("task", r#"{"steps": []}"#, "[]").expect("render");
        assert!(prompt.contains(r#"Plan JSON: {"steps": []}"#));
        assert!(prompt.contains("Results JSON: []"));
        assert!(prompt.contains("Summary, GitHub, Weather, Issues"));
    }
}
