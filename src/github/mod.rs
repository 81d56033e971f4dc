use crate::error::{Result, UpdateError};
use serde::{Deserialize, Serialize};

pub mod client;
pub use client::GitHubClient;

pub const PULL_REQUEST_TITLE: &str = "update js dependencies";
pub const PULL_REQUEST_BODY: &str = "This PR updates NPM packages";

/// Owner and name of the repository the run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoContext {
    pub owner: String,
    pub repo: String,
}

impl RepoContext {
    /// Parse an `owner/repo` slug as exported by the CI host.
    pub fn parse(slug: &str) -> Result<Self> {
        match slug.trim().split_once('/') {
            Some((owner, repo))
                if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(UpdateError::Configuration(format!(
                "Repository must be given as 'owner/repo', got '{slug}'"
            ))),
        }
    }
}

/// Everything needed to open one pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestRequest {
    #[serde(skip)]
    pub owner: String,
    #[serde(skip)]
    pub repo: String,
    pub title: String,
    pub body: String,
    pub head: String,
    pub base: String,
}

impl PullRequestRequest {
    /// The dependency-update pull request from `head` into `base`
    pub fn dependency_update(context: &RepoContext, head: &str, base: &str) -> Self {
        Self {
            owner: context.owner.clone(),
            repo: context.repo.clone(),
            title: PULL_REQUEST_TITLE.to_string(),
            body: PULL_REQUEST_BODY.to_string(),
            head: head.to_string(),
            base: base.to_string(),
        }
    }
}

/// The parts of a created pull request the run cares about.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[allow(dead_code)]
    pub html_url: String,
}

pub trait PullRequestClient {
    fn create_pull_request(&self, request: &PullRequestRequest) -> Result<PullRequest>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_repo() {
        let ctx = RepoContext::parse("octo-org/web-app").unwrap();
        assert_eq!(ctx.owner, "octo-org");
        assert_eq!(ctx.repo, "web-app");
    }

    #[test]
    fn rejects_malformed_slugs() {
        for slug in ["", "no-slash", "/repo", "owner/", "a/b/c"] {
            let err = RepoContext::parse(slug).unwrap_err();
            assert!(matches!(err, UpdateError::Configuration(_)), "{slug}");
        }
    }

    #[test]
    fn dependency_update_request_uses_fixed_title_and_body() {
        let ctx = RepoContext::parse("octo/app").unwrap();
        let request = PullRequestRequest::dependency_update(&ctx, "deps/update-2024", "main");
        assert_eq!(request.title, "update js dependencies");
        assert_eq!(request.body, "This PR updates NPM packages");
        assert_eq!(request.head, "deps/update-2024");
        assert_eq!(request.base, "main");
    }

    #[test]
    fn request_body_omits_owner_and_repo() {
        let ctx = RepoContext::parse("octo/app").unwrap();
        let request = PullRequestRequest::dependency_update(&ctx, "deps", "main");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "update js dependencies",
                "body": "This PR updates NPM packages",
                "head": "deps",
                "base": "main",
            })
        );
    }
}
