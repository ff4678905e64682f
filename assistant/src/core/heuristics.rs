//! Keyword-heuristic fallback planner.
//!
//! Used whenever LLM delegation fails. A pure function of (task, location):
//! identical inputs always yield an identical plan, the function never fails,
//! and the returned plan always has at least one step.

use serde_json::{Map, Value};

use crate::core::plan::{Plan, Step, Tool};

/// Fixed result limit for repository searches.
pub const SEARCH_LIMIT: u64 = 3;
/// Units emitted for heuristic weather steps.
pub const DEFAULT_UNITS: &str = "metric";

const RANKING_WORDS: [&str; 4] = ["top", "best", "popular", "most starred"];
const REPO_WORDS: [&str; 3] = ["repo", "github", "git"];
const WEATHER_WORDS: [&str; 3] = ["weather", "temperature", "climate"];
const CITY_PREPOSITIONS: [&str; 3] = ["in", "at", "for"];

/// Build a plan from the task text alone.
///
/// Detection priority for the repository step: ranking keywords, then an
/// explicit `owner/name` token, then generic repository keywords. A weather
/// step is added independently when the text shows weather intent and a city
/// resolves. When nothing matches, a single default search step over the full
/// task text is emitted.
pub fn fallback_plan(task: &str, location: Option<&str>) -> Plan {
    let lowered = task.to_lowercase();
    let mut steps: Vec<Step> = Vec::new();

    if let Some((action, tool, input)) = repository_step(task, &lowered) {
        steps.push(make_step(steps.len() as i64 + 1, action, tool, input));
    }

    let weather_intent = WEATHER_WORDS.iter().any(|word| lowered.contains(word));
    if weather_intent {
        if let Some(city) = resolve_city(task, location) {
            let mut input = Map::new();
            input.insert("city".to_string(), Value::String(city));
            input.insert(
                "units".to_string(),
                Value::String(DEFAULT_UNITS.to_string()),
            );
            steps.push(make_step(
                steps.len() as i64 + 1,
                "get weather",
                Tool::Weather,
                input,
            ));
        }
    }

    if steps.is_empty() {
        steps.push(make_step(
            1,
            "search repositories",
            Tool::GithubSearch,
            search_input(task.to_string()),
        ));
    }

    Plan { steps }
}

fn repository_step(task: &str, lowered: &str) -> Option<(&'static str, Tool, Map<String, Value>)> {
    if RANKING_WORDS.iter().any(|word| lowered.contains(word)) {
        let query = if lowered.contains("python") {
            "language:Python".to_string()
        } else {
            task.to_string()
        };
        return Some((
            "search repositories",
            Tool::GithubSearch,
            search_input(query),
        ));
    }

    if let Some(repo) = explicit_repo(task) {
        let mut input = Map::new();
        input.insert(
            "repo_full_name".to_string(),
            Value::String(repo.to_string()),
        );
        return Some(("fetch repository details", Tool::Github, input));
    }

    if REPO_WORDS.iter().any(|word| lowered.contains(word)) {
        return Some((
            "search repositories",
            Tool::GithubSearch,
            search_input(task.to_string()),
        ));
    }

    None
}

/// First whitespace- or comma-separated token with exactly one `/` splitting
/// it into two non-empty halves.
fn explicit_repo(task: &str) -> Option<&str> {
    task.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .find(|token| {
            let mut halves = token.splitn(3, '/');
            matches!(
                (halves.next(), halves.next(), halves.next()),
                (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty()
            )
        })
}

/// An externally supplied location is used verbatim; otherwise the token
/// after the first `in`/`at`/`for` is taken, with trailing `,`/`.` stripped.
/// Only a single token is captured, so multi-word city names truncate.
fn resolve_city(task: &str, location: Option<&str>) -> Option<String> {
    if let Some(city) = location.filter(|city| !city.is_empty()) {
        return Some(city.to_string());
    }
    let words: Vec<&str> = task.split_whitespace().collect();
    words.windows(2).find_map(|pair| {
        let lead = pair[0].to_lowercase();
        if !CITY_PREPOSITIONS.contains(&lead.as_str()) {
            return None;
        }
        let city = pair[1].trim_end_matches([',', '.']);
        (!city.is_empty()).then(|| city.to_string())
    })
}

fn search_input(query: String) -> Map<String, Value> {
    let mut input = Map::new();
    input.insert("query".to_string(), Value::String(query));
    input.insert("limit".to_string(), Value::from(SEARCH_LIMIT));
    input
}

fn make_step(step_id: i64, action: &str, tool: Tool, input: Map<String, Value>) -> Step {
    Step {
        step_id,
        action: action.to_string(),
        tool,
        input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn str_input<'a>(step: &'a Step, key: &str) -> &'a str {
        step.input[key].as_str().expect("string input")
    }

    #[test]
    fn weather_task_yields_single_weather_step() {
        let plan = fallback_plan("What's the weather in Paris", None);
        assert_eq!(plan.steps.len(), 1);
        let step = &plan.steps[0];
        assert_eq!(step.tool, Tool::Weather);
        assert_eq!(step.step_id, 1);
        assert_eq!(str_input(step, "city"), "Paris");
        assert_eq!(str_input(step, "units"), "metric");
    }

    #[test]
    fn ranking_task_with_python_uses_language_query() {
        let plan = fallback_plan("top 3 python repositories", None);
        let step = &plan.steps[0];
        assert_eq!(step.tool, Tool::GithubSearch);
        assert_eq!(str_input(step, "query"), "language:Python");
        assert_eq!(step.input["limit"], 3);
    }

    #[test]
    fn ranking_task_without_python_keeps_original_text_as_query() {
        let plan = fallback_plan("most starred Rust projects", None);
        let step = &plan.steps[0];
        assert_eq!(step.tool, Tool::GithubSearch);
        assert_eq!(str_input(step, "query"), "most starred Rust projects");
    }

    #[test]
    fn explicit_repo_token_yields_github_step() {
        let plan = fallback_plan("show me octocat/Hello-World", None);
        assert_eq!(plan.steps.len(), 1);
        let step = &plan.steps[0];
        assert_eq!(step.tool, Tool::Github);
        assert_eq!(str_input(step, "repo_full_name"), "octocat/Hello-World");
    }

    #[test]
    fn explicit_repo_takes_first_match_and_handles_commas() {
        let plan = fallback_plan("compare rust-lang/rust,tokio-rs/tokio please", None);
        let step = &plan.steps[0];
        assert_eq!(str_input(step, "repo_full_name"), "rust-lang/rust");
    }

    #[test]
    fn tokens_with_empty_halves_or_two_slashes_are_not_repos() {
        let plan = fallback_plan("look at foo/ and /bar and a/b/c here", None);
        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.steps[0].tool, Tool::GithubSearch);
        assert_eq!(
            str_input(&plan.steps[0], "query"),
            "look at foo/ and /bar and a/b/c here"
        );
    }

    #[test]
    fn ranking_keywords_take_priority_over_explicit_repo() {
        let plan = fallback_plan("best alternatives to octocat/Hello-World", None);
        assert_eq!(plan.steps[0].tool, Tool::GithubSearch);
    }

    #[test]
    fn generic_repo_keyword_searches_full_task_text() {
        let task = "find a github project for parsing logs";
        let plan = fallback_plan(task, None);
        let step = &plan.steps[0];
        assert_eq!(step.tool, Tool::GithubSearch);
        assert_eq!(str_input(step, "query"), task);
    }

    #[test]
    fn unrecognized_task_falls_back_to_default_search() {
        let plan = fallback_plan("tell me a joke", None);
        assert_eq!(plan.steps.len(), 1);
        let step = &plan.steps[0];
        assert_eq!(step.tool, Tool::GithubSearch);
        assert_eq!(str_input(step, "query"), "tell me a joke");
        assert_eq!(step.input["limit"], 3);
    }

    #[test]
    fn repository_and_weather_steps_combine_in_order() {
        let plan = fallback_plan("top python repos and the weather in Oslo", None);
        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[0].tool, Tool::GithubSearch);
        assert_eq!(plan.steps[0].step_id, 1);
        assert_eq!(plan.steps[1].tool, Tool::Weather);
        assert_eq!(plan.steps[1].step_id, 2);
        assert_eq!(str_input(&plan.steps[1], "city"), "Oslo");
    }

    #[test]
    fn supplied_location_takes_precedence_over_task_tokens() {
        let plan = fallback_plan("what's the temperature in Lima", Some("Tokyo"));
        assert_eq!(str_input(&plan.steps[0], "city"), "Tokyo");
    }

    #[test]
    fn multi_word_city_truncates_to_first_token() {
        let plan = fallback_plan("weather in New York", None);
        assert_eq!(str_input(&plan.steps[0], "city"), "New");
    }

    #[test]
    fn city_token_strips_trailing_punctuation() {
        let plan = fallback_plan("what is the climate in Paris, this week", None);
        assert_eq!(str_input(&plan.steps[0], "city"), "Paris");
    }

    #[test]
    fn weather_intent_without_city_emits_default_search() {
        let plan = fallback_plan("is the weather nice today", None);
        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.steps[0].tool, Tool::GithubSearch);
    }

    #[test]
    fn fallback_plan_is_deterministic() {
        let task = "top python repos and the weather in Oslo";
        assert_eq!(fallback_plan(task, None), fallback_plan(task, None));
        assert_eq!(
            fallback_plan(task, Some("Bergen")),
            fallback_plan(task, Some("Bergen"))
        );
    }
}
