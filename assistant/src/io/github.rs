//! GitHub REST adapter: repository details and repository search.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header;
use tracing::debug;

use crate::core::plan::{RepoDetails, SearchItem, SearchResults, ToolOutcome};
use crate::io::config::{GithubConfig, TOOL_TIMEOUT_SECS};
use crate::io::retry::with_retries;

/// Statuses that end the retry loop: success plus the client errors GitHub
/// uses for bad input, auth, rate limiting, and missing repos.
const TERMINAL_STATUSES: [u16; 5] = [200, 400, 401, 403, 404];

pub struct GithubClient {
    config: GithubConfig,
    client: Client,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TOOL_TIMEOUT_SECS))
            .user_agent("assistant")
            .build()
            .context("build github http client")?;
        Ok(Self {
            config: config.clone(),
            client,
        })
    }

    /// Fetch details for an `owner/name` repository.
    pub fn repo_details(&self, repo_full_name: &str) -> Result<ToolOutcome> {
        let url = format!("{}/repos/{}", self.config.base_url, repo_full_name);
        debug!(repo = repo_full_name, "fetching repository details");
        let response = self.get(&url, &[])?;
        if !response.status().is_success() {
            return Ok(upstream_failure(response));
        }
        let raw: RawRepo = response.json().context("parse github repo response")?;
        Ok(ToolOutcome::Repo(raw.into()))
    }

    /// Search repositories by keyword, sorted by stars descending.
    pub fn search_repositories(&self, query: &str, limit: u64) -> Result<ToolOutcome> {
        let url = format!("{}/search/repositories", self.config.base_url);
        let per_page = limit.to_string();
        debug!(query, limit, "searching repositories");
        let response = self.get(
            &url,
            &[
                ("q", query),
                ("per_page", &per_page),
                ("sort", "stars"),
                ("order", "desc"),
            ],
        )?;
        if !response.status().is_success() {
            return Ok(upstream_failure(response));
        }
        let raw: RawSearch = response.json().context("parse github search response")?;
        Ok(ToolOutcome::Search(SearchResults {
            items: raw.items.into_iter().map(SearchItem::from).collect(),
        }))
    }

    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Response> {
        with_retries(
            |response: &Response| TERMINAL_STATUSES.contains(&response.status().as_u16()),
            || {
                let mut request = self
                    .client
                    .get(url)
                    .header(header::ACCEPT, "application/vnd.github+json")
                    .query(query);
                if let Some(token) = &self.config.token {
                    request = request.bearer_auth(token);
                }
                request.send().context("send github request")
            },
        )
    }
}

fn upstream_failure(response: Response) -> ToolOutcome {
    let status = response.status().as_u16();
    let details = response.text().unwrap_or_default();
    ToolOutcome::failure_with_details(format!("GitHub API returned {status}"), details)
}

#[derive(serde::Deserialize)]
struct RawRepo {
    full_name: String,
    description: Option<String>,
    stargazers_count: u64,
    forks_count: u64,
    open_issues_count: u64,
    language: Option<String>,
    html_url: String,
}

impl From<RawRepo> for RepoDetails {
    fn from(raw: RawRepo) -> Self {
        Self {
            name: raw.full_name,
            description: raw.description,
            stars: raw.stargazers_count,
            forks: raw.forks_count,
            open_issues: raw.open_issues_count,
            language: raw.language,
            html_url: raw.html_url,
        }
    }
}

#[derive(serde::Deserialize)]
struct RawSearch {
    #[serde(default)]
    items: Vec<RawSearchItem>,
}

#[derive(serde::Deserialize)]
struct RawSearchItem {
    full_name: String,
    stargazers_count: u64,
    html_url: String,
}

impl From<RawSearchItem> for SearchItem {
    fn from(raw: RawSearchItem) -> Self {
        Self {
            name: raw.full_name,
            stars: raw.stargazers_count,
            html_url: raw.html_url,
        }
    }
}
