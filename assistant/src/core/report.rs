//! Deterministic report aggregation, used when verifier delegation fails.

use crate::core::plan::{StepResult, Tool, ToolOutcome};

const NO_GITHUB_DATA: &str = "No GitHub data.";
const NO_WEATHER_DATA: &str = "No weather data.";

/// Aggregate step results into the fixed Summary/GitHub/Weather/Issues
/// layout.
///
/// Failed outcomes surface as `Step <id>: <error>` lines under Issues.
/// Empty GitHub/Weather sections render a placeholder line; an empty Issues
/// section is omitted entirely. Unknown-tool records carry no outcome and do
/// not contribute lines.
pub fn fallback_report(results: &[StepResult]) -> String {
    let mut github_lines: Vec<String> = Vec::new();
    let mut weather_lines: Vec<String> = Vec::new();
    let mut issue_lines: Vec<String> = Vec::new();

    for entry in results {
        let StepResult::Completed {
            step_id,
            tool,
            result,
            ..
        } = entry
        else {
            continue;
        };
        match result {
            ToolOutcome::Failure(failure) => {
                issue_lines.push(format!("Step {step_id}: {}", failure.error));
            }
            ToolOutcome::Search(search) if *tool == Tool::GithubSearch => {
                for item in &search.items {
                    github_lines.push(format!("{} (⭐ {})", item.name, item.stars));
                }
            }
            ToolOutcome::Repo(repo) if *tool == Tool::Github => {
                github_lines.push(format!("{} (⭐ {})", repo.name, repo.stars));
            }
            ToolOutcome::Weather(weather) if *tool == Tool::Weather => {
                weather_lines.push(format!(
                    "{}: {}°C, {}",
                    weather.city,
                    weather.temperature,
                    weather.conditions.as_deref().unwrap_or("unknown")
                ));
            }
            _ => {}
        }
    }

    let mut parts = vec![
        "Summary".to_string(),
        "Summary: Results processed.".to_string(),
    ];
    parts.push("\nGitHub".to_string());
    if github_lines.is_empty() {
        parts.push(NO_GITHUB_DATA.to_string());
    } else {
        parts.extend(github_lines);
    }
    parts.push("\nWeather".to_string());
    if weather_lines.is_empty() {
        parts.push(NO_WEATHER_DATA.to_string());
    } else {
        parts.extend(weather_lines);
    }
    if !issue_lines.is_empty() {
        parts.push("\nIssues".to_string());
        parts.extend(issue_lines);
    }
    parts.join("\n")
}
