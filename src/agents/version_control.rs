use crate::agents::package_manager::MANIFEST_FILES;
use crate::agents::process::{CommandResult, CommandRunner, ensure_success};
use crate::error::{Result, UpdateError};
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub const COMMIT_MESSAGE: &str = "chore: update js dependencies";

const REMOTE: &str = "origin";

/// Author identity written into the update commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

impl Default for CommitIdentity {
    fn default() -> Self {
        Self {
            name: "gh-automation".to_string(),
            email: "gh-automation@email.com".to_string(),
        }
    }
}

/// VersionControlAgent runs the git half of the update inside the working directory.
pub struct VersionControlAgent {
    runner: Rc<dyn CommandRunner>,
    working_dir: PathBuf,
}

impl VersionControlAgent {
    pub fn new<P: AsRef<Path>>(runner: Rc<dyn CommandRunner>, working_dir: P) -> Self {
        Self {
            runner,
            working_dir: working_dir.as_ref().to_path_buf(),
        }
    }

    /// Set the commit author for this repository only (no `--global`)
    pub fn configure_identity(&self, identity: &CommitIdentity) -> Result<()> {
        self.run_git(&["config", "user.name", &identity.name], "git config user.name")?;
        self.run_git(&["config", "user.email", &identity.email], "git config user.email")?;
        Ok(())
    }

    /// Create and switch to the head branch
    pub fn create_branch(&self, branch: &str) -> Result<()> {
        self.run_git(&["checkout", "-b", branch], "git checkout -b")?;
        Ok(())
    }

    /// Stage exactly the manifest and lock files
    pub fn stage_manifests(&self) -> Result<()> {
        let mut args = vec!["add"];
        args.extend(MANIFEST_FILES);
        self.run_git(&args, "git add")?;
        Ok(())
    }

    pub fn commit(&self) -> Result<()> {
        self.run_git(&["commit", "-m", COMMIT_MESSAGE], "git commit")?;
        Ok(())
    }

    /// Push the branch, replacing whatever the remote holds under that name
    pub fn force_push(&self, branch: &str) -> Result<()> {
        self.run_git(&["push", "-u", REMOTE, branch, "--force"], "git push")?;
        Ok(())
    }

    /// Full workflow: identity, branch, stage, commit, force-push.
    /// Stops at the first failing step.
    pub fn publish_changes(&self, branch: &str, identity: &CommitIdentity) -> Result<()> {
        self.configure_identity(identity)?;
        self.create_branch(branch)?;
        self.stage_manifests()?;
        self.commit()?;
        self.force_push(branch)
    }

    fn run_git(&self, args: &[&str], command: &str) -> Result<CommandResult> {
        let result = self.runner.exec("git", args, &self.working_dir)?;
        ensure_success(result, command, UpdateError::GitOperation)
    }
}
