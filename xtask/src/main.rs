//! Development tasks for jig

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
struct Xtask {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate the Markdown CLI reference
    GenDocs {
        /// Where to write the reference
        #[arg(long, default_value = "docs/cli/reference.md")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().command {
        Task::GenDocs { output } => {
            let markdown = clap_markdown::help_markdown::<jig::cli::Cli>();
            if let Some(dir) = output.parent() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
            }
            fs::write(&output, markdown)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Wrote {}", output.display());
        }
    }
    Ok(())
}
