//! Command-line interface

pub mod checkout;
pub mod clone;
pub mod completion;
pub mod list;
pub mod progress;
pub mod pull;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "jig", version, about = "Find, fuzzy-search and sync git repositories")]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = "JIG_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List repositories below the current directory
    #[command(visible_alias = "ls")]
    List(list::ListArgs),

    /// Clone a repository, showing progress
    Clone(clone::CloneArgs),

    /// Pull into a repository, showing progress
    Pull(pull::PullArgs),

    /// Check out a branch or ref, showing progress
    Checkout(checkout::CheckoutArgs),

    /// Generate shell completions
    Completion(completion::CompletionArgs),
}

pub async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::List(args) => list::run(&Config::load(config_path)?, args),
        Commands::Clone(args) => clone::run(&Config::load(config_path)?, args).await,
        Commands::Pull(args) => pull::run(&Config::load(config_path)?, args).await,
        Commands::Checkout(args) => checkout::run(&Config::load(config_path)?, args).await,
        Commands::Completion(args) => completion::run(args),
    }
}
