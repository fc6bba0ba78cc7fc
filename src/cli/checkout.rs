//! `jig checkout` command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::progress::{self, OutputArgs};
use crate::config::Config;
use crate::vcs::{Git, Repo, Vcs};

#[derive(Args)]
pub struct CheckoutArgs {
    /// Branch, tag or commit to check out
    target: String,

    /// Repository to check out in (default is the current directory)
    #[arg(short = 'C', long)]
    path: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

pub async fn run(config: &Config, args: CheckoutArgs) -> Result<()> {
    let mut repo = Repo::new(args.target);
    if let Some(path) = args.path {
        repo = repo.with_path(path);
    }

    let git = Git::from_config(&config.git);
    let invocation = git.checkout(&repo, progress::cancel_on_interrupt())?;
    progress::follow(invocation, &args.output).await
}
