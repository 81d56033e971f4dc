mod actions;
mod agents;
mod cli;
mod config;
mod error;
mod github;
mod utils;
mod workflow;

use actions::{ActionsCore, GitHubActionsCore};
use agents::SystemCommandRunner;
use clap::Parser;
use cli::Cli;
use colored::Colorize;
use config::RunConfig;
use error::Result;
use github::{GitHubClient, PullRequestClient};
use std::process;
use std::rc::Rc;
use workflow::{ClientConnector, UpdateRunner};

fn main() {
    let cli = Cli::parse();
    let config = RunConfig::from_inputs(cli);
    let core = Rc::new(GitHubActionsCore::new());

    let connect: ClientConnector =
        Box::new(|config: &RunConfig| -> Result<Rc<dyn PullRequestClient>> {
            let client = GitHubClient::new(&config.api_url, config.token.clone())?;
            Ok(Rc::new(client) as Rc<dyn PullRequestClient>)
        });

    let runner = UpdateRunner::new(
        config,
        Rc::new(SystemCommandRunner::new()),
        connect,
        core.clone(),
    );

    match runner.run() {
        Ok(outcome) if outcome.is_failure() => process::exit(1),
        Ok(_) => {}
        Err(e) => {
            core.error(&e.to_string());
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}
