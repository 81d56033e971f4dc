use crate::actions::{ActionsCore, Logger};
use crate::agents::{CommandRunner, CommitIdentity, PackageManagerAgent, VersionControlAgent};
use crate::config::{LOG_PREFIX, RunConfig};
use crate::error::Result;
use crate::github::{PullRequest, PullRequestClient, PullRequestRequest, RepoContext};
use std::rc::Rc;

/// How a run ended. Errors from npm or git are not outcomes; they surface as `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// An input failed validation; nothing external was touched.
    InvalidInput(String),
    /// The manifests did not change.
    NoUpdates,
    #[allow(dead_code)]
    PullRequestOpened(PullRequest),
    /// Changes were pushed but the pull request could not be opened.
    PullRequestFailed(String),
}

impl RunOutcome {
    /// The message the run was marked failed with, if any.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            RunOutcome::InvalidInput(message) | RunOutcome::PullRequestFailed(message) => {
                Some(message)
            }
            RunOutcome::NoUpdates | RunOutcome::PullRequestOpened(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure_message().is_some()
    }
}

/// Builds the pull request client once inputs have been validated.
pub type ClientConnector = Box<dyn Fn(&RunConfig) -> Result<Rc<dyn PullRequestClient>>>;

/// Drives one update: validate, detect, publish, open the pull request.
pub struct UpdateRunner {
    config: RunConfig,
    runner: Rc<dyn CommandRunner>,
    connect: ClientConnector,
    core: Rc<dyn ActionsCore>,
    identity: CommitIdentity,
}

impl UpdateRunner {
    pub fn new(
        config: RunConfig,
        runner: Rc<dyn CommandRunner>,
        connect: ClientConnector,
        core: Rc<dyn ActionsCore>,
    ) -> Self {
        Self {
            config,
            runner,
            connect,
            core,
            identity: CommitIdentity::default(),
        }
    }

    #[cfg(test)]
    pub fn with_identity(mut self, identity: CommitIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Execute the run once, top to bottom.
    pub fn run(&self) -> Result<RunOutcome> {
        let config = &self.config;
        let core = self.core.as_ref();
        let logger = Logger::new(core, config.debug, LOG_PREFIX);

        core.set_secret(&config.token);

        logger.debug("validating inputs - base branch, head branch, working directory");
        if let Some(message) = config.validation_error() {
            core.set_failed(&message);
            return Ok(RunOutcome::InvalidInput(message));
        }

        let context = match RepoContext::parse(&config.repository) {
            Ok(context) => context,
            Err(err) => {
                let message = err.to_string();
                core.set_failed(&message);
                return Ok(RunOutcome::InvalidInput(message));
            }
        };

        let pr_client = match (self.connect)(config) {
            Ok(client) => client,
            Err(err) => {
                let message = err.to_string();
                core.set_failed(&message);
                return Ok(RunOutcome::InvalidInput(message));
            }
        };

        logger.debug(&format!("base branch is {}", config.base_branch));
        logger.debug(&format!("head branch is {}", config.head_branch));
        logger.debug(&format!(
            "working directory is {}",
            config.working_dir.display()
        ));

        logger.debug("checking packages updates");
        let npm = PackageManagerAgent::new(self.runner.clone(), &config.working_dir);
        if !npm.detect_updates()? {
            logger.info("No updates available");
            return Ok(RunOutcome::NoUpdates);
        }

        logger.debug("There are updates available!");
        logger.debug("committing and pushing changes");
        let git = VersionControlAgent::new(self.runner.clone(), &config.working_dir);
        git.publish_changes(&config.head_branch, &self.identity)?;

        logger.debug(&format!(
            "creating pull request from {} into {}",
            config.head_branch, config.base_branch
        ));
        let request =
            PullRequestRequest::dependency_update(&context, &config.head_branch, &config.base_branch);

        match pr_client.create_pull_request(&request) {
            Ok(pull_request) => {
                logger.debug(&format!("opened pull request #{}", pull_request.number));
                Ok(RunOutcome::PullRequestOpened(pull_request))
            }
            Err(err) => {
                logger.error(&format!(
                    "something went wrong while creating the pull request: {err} ({err:?})"
                ));
                core.set_failed(&err.to_string());
                Ok(RunOutcome::PullRequestFailed(err.to_string()))
            }
        }
    }
}
