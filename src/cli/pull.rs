//! `jig pull` command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::progress::{self, OutputArgs};
use crate::config::Config;
use crate::vcs::{Git, Repo, Vcs};

#[derive(Args)]
pub struct PullArgs {
    /// Remote name or URL to pull from
    #[arg(default_value = "origin")]
    remote: String,

    /// Branch or ref to pull
    reference: Option<String>,

    /// Repository to pull into (default is the current directory)
    #[arg(short = 'C', long)]
    path: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

pub async fn run(config: &Config, args: PullArgs) -> Result<()> {
    let mut repo = Repo::new(args.remote);
    if let Some(reference) = args.reference {
        repo = repo.with_reference(reference);
    }
    if let Some(path) = args.path {
        repo = repo.with_path(path);
    }

    let git = Git::from_config(&config.git);
    let invocation = git.pull(&repo, progress::cancel_on_interrupt())?;
    progress::follow(invocation, &args.output).await
}
