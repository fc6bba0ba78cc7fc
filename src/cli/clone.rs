//! `jig clone` command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::progress::{self, OutputArgs};
use crate::config::Config;
use crate::vcs::{Git, Repo, Vcs};

#[derive(Args)]
pub struct CloneArgs {
    /// Repository to clone
    url: String,

    /// Destination directory
    path: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

pub async fn run(config: &Config, args: CloneArgs) -> Result<()> {
    let mut repo = Repo::new(args.url);
    if let Some(path) = args.path {
        repo = repo.with_path(path);
    }

    let git = Git::from_config(&config.git);
    let invocation = git.clone_repo(&repo, progress::cancel_on_interrupt())?;
    progress::follow(invocation, &args.output).await
}
