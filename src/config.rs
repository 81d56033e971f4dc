use crate::cli::Cli;
use crate::utils::{InputClass, InputValidator};
use std::fmt;
use std::path::PathBuf;

pub const LOG_PREFIX: &str = "[js-dependency-update]";

const BRANCH_RULE: &str = "Branch names should include only characters, numbers, hyphens, underscores, dots, and forward slashes.";
const DIRECTORY_RULE: &str = "Directory names should include only characters, numbers, hyphens, underscores, and forward slashes.";

/// Immutable inputs for one run.
#[derive(Clone)]
pub struct RunConfig {
    pub base_branch: String,
    pub head_branch: String,
    pub token: String,
    pub working_dir: PathBuf,
    pub debug: bool,
    pub repository: String,
    pub api_url: String,
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("base_branch", &self.base_branch)
            .field("head_branch", &self.head_branch)
            .field("token", &"***")
            .field("working_dir", &self.working_dir)
            .field("debug", &self.debug)
            .field("repository", &self.repository)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl RunConfig {
    pub fn from_inputs(cli: Cli) -> Self {
        Self {
            base_branch: cli.base_branch,
            head_branch: cli.head_branch,
            token: cli.gh_token,
            working_dir: PathBuf::from(cli.working_directory),
            debug: parse_debug_flag(&cli.debug),
            repository: cli.repository,
            api_url: cli.api_url,
        }
    }

    /// First violated input rule, as the message shown to the user.
    /// Checked in order: base branch, head branch, working directory.
    pub fn validation_error(&self) -> Option<String> {
        if !InputValidator::is_valid(&self.base_branch, InputClass::Branch) {
            return Some(format!("Invalid base-branch name. {BRANCH_RULE}"));
        }

        if !InputValidator::is_valid(&self.head_branch, InputClass::Branch) {
            return Some(format!("Invalid head-branch name. {BRANCH_RULE}"));
        }

        if !is_valid_working_dir(&self.working_dir.to_string_lossy()) {
            return Some(format!("Invalid working directory name. {DIRECTORY_RULE}"));
        }

        None
    }
}

/// `.` names the checkout root; anything else must pass the directory whitelist.
fn is_valid_working_dir(dir: &str) -> bool {
    dir == "." || InputValidator::is_valid(dir, InputClass::Directory)
}

pub fn parse_debug_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}
