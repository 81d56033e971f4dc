use crate::error::{Result, UpdateError};
use crate::github::{PullRequest, PullRequestClient, PullRequestRequest};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const ACCEPT: &str = "application/vnd.github+json";

/// GitHub REST client, authenticated with the run's token
pub struct GitHubClient {
    client: Client,
    api_url: Url,
    token: String,
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url.as_str())
            .field("token", &"***")
            .finish()
    }
}

impl GitHubClient {
    pub fn new(api_url: &str, token: impl Into<String>) -> Result<Self> {
        let api_url = Self::validate_api_url(api_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("js-dependency-update/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url,
            token: token.into(),
        })
    }

    fn validate_api_url(api_url: &str) -> Result<Url> {
        let parsed = Url::parse(api_url)?;

        match parsed.scheme() {
            "https" | "http" => Ok(parsed),
            scheme => Err(UpdateError::Configuration(format!(
                "Unsupported API URL scheme: {scheme}"
            ))),
        }
    }

    /// `{api}/repos/{owner}/{repo}/pulls`, keeping any path prefix on enterprise hosts
    fn pulls_endpoint(&self, owner: &str, repo: &str) -> String {
        format!(
            "{}/repos/{}/{}/pulls",
            self.api_url.as_str().trim_end_matches('/'),
            owner,
            repo
        )
    }
}

impl PullRequestClient for GitHubClient {
    fn create_pull_request(&self, request: &PullRequestRequest) -> Result<PullRequest> {
        let endpoint = self.pulls_endpoint(&request.owner, &request.repo);

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
            .json(request)
            .send()?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<PullRequest>()?);
        }

        let body = response.text().unwrap_or_default();
        Err(UpdateError::PullRequest(describe_failure(status, &body)))
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
    code: Option<String>,
}

/// Render a failed API response, preferring GitHub's own error messages.
fn describe_failure(status: StatusCode, body: &str) -> String {
    let Ok(error) = serde_json::from_str::<ApiError>(body) else {
        let body = body.trim();
        return if body.is_empty() {
            format!("HTTP {status}")
        } else {
            format!("HTTP {status}: {body}")
        };
    };

    let details: Vec<&str> = error
        .errors
        .iter()
        .filter_map(|d| d.message.as_deref().or(d.code.as_deref()))
        .collect();

    if details.is_empty() {
        format!("HTTP {status}: {}", error.message)
    } else {
        format!("HTTP {status}: {} ({})", error.message, details.join("; "))
    }
}
