//! Terminal rendering of VCS progress

use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use clap::Args;
use tokio_util::sync::CancellationToken;

use crate::vcs::{Invocation, Progress};

#[derive(Args)]
pub struct OutputArgs {
    /// Print progress events as JSON lines on stdout
    #[arg(long)]
    json: bool,
}

/// A token that fires on Ctrl-C.
pub fn cancel_on_interrupt() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });
    cancel
}

/// Show every event of `invocation`, then wait for the process.
pub async fn follow(mut invocation: Invocation, output: &OutputArgs) -> Result<()> {
    let mut renderer = Renderer::new(output.json, io::stderr().is_terminal());
    while let Some(progress) = invocation.recv().await {
        renderer.show(&progress)?;
    }
    renderer.finish()?;

    invocation.wait().await?;
    Ok(())
}

/// `Receiving objects:  50% (5/10), 1.2 MiB`
///
/// git redraws progress with bare `\r`, so a line can carry a run of later
/// refreshes after the first; only the first is shown.
pub fn format_progress(progress: &Progress) -> String {
    let detail = progress.detail.split('\r').next().unwrap_or_default();
    match progress.percent() {
        Some(percent) => format!(
            "{}: {:>3}% ({}/{}){}",
            progress.operation, percent, progress.current, progress.total, detail
        ),
        None => format!("{}: {}{}", progress.operation, progress.current, detail),
    }
}

struct Renderer {
    json: bool,
    overwrite: bool,
    // A partially drawn line is waiting on stderr
    open_line: bool,
}

impl Renderer {
    fn new(json: bool, overwrite: bool) -> Self {
        Self {
            json,
            overwrite,
            open_line: false,
        }
    }

    fn show(&mut self, progress: &Progress) -> Result<()> {
        if self.json {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer(&mut stdout, progress)?;
            writeln!(stdout)?;
            return Ok(());
        }

        let mut stderr = io::stderr().lock();
        if !self.overwrite {
            writeln!(stderr, "{}", format_progress(progress))?;
            return Ok(());
        }

        if progress.is_begin && self.open_line {
            writeln!(stderr)?;
        }
        write!(stderr, "\r\x1b[K{}", format_progress(progress))?;
        stderr.flush()?;
        self.open_line = true;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.open_line {
            writeln!(io::stderr())?;
            self.open_line = false;
        }
        Ok(())
    }
}
