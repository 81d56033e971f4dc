use crate::github::client::DEFAULT_API_URL;
use clap::Parser;
use std::fmt;

/// Inputs fall back to the `INPUT_*` variables GitHub Actions sets for a step.
#[derive(Parser)]
#[command(
    name = "js-dependency-update",
    about = "Run npm update and open a pull request when package manifests change",
    version
)]
pub struct Cli {
    /// Branch the pull request targets
    #[arg(long, env = "INPUT_BASE-BRANCH")]
    pub base_branch: String,

    /// Branch created (or overwritten) with the updated manifests
    #[arg(long, env = "INPUT_HEAD-BRANCH")]
    pub head_branch: String,

    /// Token used to open the pull request
    #[arg(long, env = "INPUT_GH-TOKEN", hide_env_values = true)]
    pub gh_token: String,

    /// Directory holding package.json; all npm and git commands run here
    #[arg(long, env = "INPUT_WORKING-DIRECTORY")]
    pub working_directory: String,

    /// "true" enables debug output
    #[arg(long, env = "INPUT_DEBUG", default_value = "false")]
    pub debug: String,

    /// Repository slug (owner/repo)
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    /// REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

impl fmt::Debug for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cli")
            .field("base_branch", &self.base_branch)
            .field("head_branch", &self.head_branch)
            .field("gh_token", &"***")
            .field("working_directory", &self.working_directory)
            .field("debug", &self.debug)
            .field("repository", &self.repository)
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(extra: &[&str]) -> Cli {
        let mut args = vec![
            "js-dependency-update",
            "--base-branch",
            "main",
            "--head-branch",
            "deps/update-2024",
            "--gh-token",
            "ghp_secret",
            "--working-directory",
            ".",
            "--repository",
            "octo/app",
        ];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn debug_defaults_to_false() {
        let cli = parse(&[]);
        assert_eq!(cli.debug, "false");
    }

    #[test]
    fn accepts_explicit_api_url() {
        let cli = parse(&["--api-url", "https://ghe.example.com/api/v3"]);
        assert_eq!(cli.api_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn debug_format_masks_token() {
        let cli = parse(&[]);
        assert!(!format!("{cli:?}").contains("ghp_secret"));
    }
}
