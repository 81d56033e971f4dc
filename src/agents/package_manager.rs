use crate::agents::process::{CommandRunner, ensure_success};
use crate::error::{Result, UpdateError};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Manifest and lockfile tracked for changes. Staged as-is by the publisher.
pub const MANIFEST_FILES: [&str; 2] = ["package.json", "package-lock.json"];

/// Pathspec restricting the status query to the manifest files.
const MANIFEST_PATHSPEC: &str = "package*.json";

/// PackageManagerAgent drives npm and reports whether it touched the manifests
pub struct PackageManagerAgent {
    runner: Rc<dyn CommandRunner>,
    working_dir: PathBuf,
}

impl PackageManagerAgent {
    pub fn new<P: AsRef<Path>>(runner: Rc<dyn CommandRunner>, working_dir: P) -> Self {
        Self {
            runner,
            working_dir: working_dir.as_ref().to_path_buf(),
        }
    }

    /// Run `npm update`, rewriting the lockfile in place
    pub fn update(&self) -> Result<()> {
        let result = self.runner.exec("npm", &["update"], &self.working_dir)?;
        ensure_success(result, "npm update", UpdateError::PackageManager)?;
        Ok(())
    }

    /// Short git status for the manifest files only
    pub fn manifest_status(&self) -> Result<String> {
        let result = self.runner.exec_output(
            "git",
            &["status", "-s", "--", MANIFEST_PATHSPEC],
            &self.working_dir,
        )?;
        let result = ensure_success(result, "git status", UpdateError::GitOperation)?;
        Ok(result.stdout)
    }

    /// Update, then report whether the manifests now differ from HEAD.
    pub fn detect_updates(&self) -> Result<bool> {
        self.update()?;
        let status = self.manifest_status()?;
        Ok(has_pending_changes(&status))
    }
}

/// Any status output at all counts as a change set. There is no parse of
/// which packages moved.
pub fn has_pending_changes(status_output: &str) -> bool {
    !status_output.is_empty()
}
