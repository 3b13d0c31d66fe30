//! GitHub repository search
//!
//! Enriches roadmap prompts with similar open-source projects. The search
//! collaborator is optional: callers treat any failure as an empty result
//! list and move on.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default GitHub API endpoint
const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Search requests should never stall a roadmap for long
const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from GitHub search operations
#[derive(Debug, Error)]
pub enum GithubError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("GitHub API error ({status}): {message}")]
    ApiError { status: u16, message: String },
}

/// One repository from a search result
#[derive(Debug, Clone)]
pub struct Repo {
    pub name: String,
    pub description: String,
    pub stars: u64,
    pub language: String,
    pub url: String,
    pub updated_at: String,
}

/// Search results, capped at the requested count
#[derive(Debug, Clone, Default)]
pub struct RepoSearchResults {
    /// Total matches reported by the API (not the returned count)
    pub total_found: u64,
    pub repos: Vec<Repo>,
}

/// GitHub repository search client
pub struct GithubClient {
    http: Client,
    base_url: String,
}

impl GithubClient {
    /// Create a client against the public GitHub API
    pub fn new() -> Result<Self, GithubError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, GithubError> {
        let http = Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .user_agent("projectagent/0.1")
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Search repositories by stars, descending
    pub async fn search(&self, query: &str, max_results: usize) -> Result<RepoSearchResults, GithubError> {
        debug!(%query, max_results, "search: called");
        let url = format!("{}/search/repositories", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", &max_results.to_string()),
            ])
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status, "search: API error");
            return Err(GithubError::ApiError { status, message });
        }

        let api_response: SearchResponse = response.json().await?;
        debug!(total = api_response.total_count, "search: success");
        Ok(convert(api_response, max_results))
    }
}

/// Map the API response into our result type, filling defaults for
/// repositories with sparse metadata
fn convert(response: SearchResponse, max_results: usize) -> RepoSearchResults {
    let repos = response
        .items
        .into_iter()
        .take(max_results)
        .map(|item| Repo {
            name: item.name,
            description: item.description.unwrap_or_else(|| "No description".to_string()),
            stars: item.stargazers_count,
            language: item.language.unwrap_or_else(|| "Not specified".to_string()),
            url: item.html_url,
            updated_at: item.updated_at.unwrap_or_else(|| "Unknown".to_string()),
        })
        .collect();

    RepoSearchResults {
        total_found: response.total_count,
        repos,
    }
}

// API response types

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    name: String,
    description: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    language: Option<String>,
    html_url: String,
    updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> SearchResponse {
        serde_json::from_value(serde_json::json!({
            "total_count": 120,
            "items": [
                {
                    "name": "alpha",
                    "description": "First project",
                    "stargazers_count": 500,
                    "language": "Rust",
                    "html_url": "https://github.com/x/alpha",
                    "updated_at": "2025-01-01T00:00:00Z"
                },
                {
                    "name": "beta",
                    "description": null,
                    "stargazers_count": 10,
                    "language": null,
                    "html_url": "https://github.com/x/beta",
                    "updated_at": null
                },
                {
                    "name": "gamma",
                    "description": "Third",
                    "stargazers_count": 1,
                    "language": "Go",
                    "html_url": "https://github.com/x/gamma",
                    "updated_at": "2025-01-01T00:00:00Z"
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_convert_caps_results() {
        let results = convert(sample_response(), 2);
        assert_eq!(results.total_found, 120);
        assert_eq!(results.repos.len(), 2);
        assert_eq!(results.repos[0].name, "alpha");
    }

    #[test]
    fn test_convert_fills_defaults_for_sparse_items() {
        let results = convert(sample_response(), 5);
        let beta = &results.repos[1];
        assert_eq!(beta.description, "No description");
        assert_eq!(beta.language, "Not specified");
        assert_eq!(beta.updated_at, "Unknown");
    }

    #[test]
    fn test_empty_response_deserializes() {
        let response: SearchResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        let results = convert(response, 5);
        assert_eq!(results.total_found, 0);
        assert!(results.repos.is_empty());
    }
}
