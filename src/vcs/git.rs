//! Git driver

use std::collections::VecDeque;
use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use futures::StreamExt;
use tokio::process::{Child, ChildStderr, Command};
use tokio::sync::mpsc;
use tokio_util::codec::FramedRead;
use tokio_util::sync::CancellationToken;

use super::error::{Result, VcsError};
use super::{parse_line, Action, Invocation, LineSplitter, OperationTracker, Progress, Repo, Vcs};
use crate::config::GitConfig;

const NOISE_TAIL_LINES: usize = 10;

/// Drives the `git` executable.
///
/// Holds no per-invocation state, so one value can serve any number of
/// concurrent invocations.
#[derive(Debug, Clone)]
pub struct Git {
    program: String,
    channel_capacity: usize,
    kill_grace: Duration,
    max_line_length: usize,
}

impl Default for Git {
    fn default() -> Self {
        Self::from_config(&GitConfig::default())
    }
}

impl Git {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn from_config(config: &GitConfig) -> Self {
        Self {
            program: config.binary.clone(),
            channel_capacity: config.channel_capacity,
            kill_grace: Duration::from_millis(config.kill_grace_ms),
            max_line_length: config.max_line_length,
        }
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Time a process gets to exit after SIGTERM before it is killed.
    pub fn with_kill_grace(mut self, grace: Duration) -> Self {
        self.kill_grace = grace;
        self
    }

    /// Lines longer than this are dropped as noise.
    pub fn with_max_line_length(mut self, max_length: usize) -> Self {
        self.max_line_length = max_length;
        self
    }
}

/// Build the argument list for `git <action>`.
///
/// Produces e.g. `["clone", "--progress", url, path]`.
pub fn command_args(action: Action, repo: &Repo) -> Vec<String> {
    let mut args = vec![action.as_str().to_string(), "--progress".to_string()];
    match action {
        Action::Clone => {
            args.push(repo.url.clone());
            if let Some(path) = &repo.path {
                args.push(path.display().to_string());
            }
        }
        Action::Pull => {
            args.push(repo.url.clone());
            if let Some(reference) = &repo.reference {
                args.push(reference.clone());
            }
        }
        Action::Checkout => {
            args.push(repo.reference.clone().unwrap_or_else(|| repo.url.clone()));
        }
    }
    args
}

impl Vcs for Git {
    /// Spawn `git` for `action`. Must be called within a tokio runtime.
    fn run(&self, action: Action, repo: &Repo, cancel: CancellationToken) -> Result<Invocation> {
        let args = command_args(action, repo);
        tracing::debug!(program = %self.program, ?args, "Spawning VCS process");

        let mut command = std::process::Command::new(&self.program);
        command
            .args(&args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        if action != Action::Clone {
            if let Some(path) = &repo.path {
                command.current_dir(path);
            }
        }
        own_process_group(&mut command);
        let mut command = Command::from(command);
        command.kill_on_drop(true);

        let mut child = command.spawn().map_err(|source| VcsError::Launch {
            program: self.program.clone(),
            action,
            source,
        })?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "stderr was not captured"))?;
        let pid = child.id();

        let (tx, rx) = mpsc::channel(self.channel_capacity.max(1));
        let cancel = cancel.child_token();
        let splitter = LineSplitter::with_max_length(self.max_line_length);
        let stop = Stop {
            cancel: cancel.clone(),
            group: pid,
            grace: self.kill_grace,
        };
        let task = tokio::spawn(pump(action, child, FramedRead::new(stderr, splitter), tx, stop));

        Ok(Invocation::new(action, pid, rx, cancel, task))
    }
}

/// Read `stderr` to the end, publishing one event per progress line, then
/// reap the process.
async fn pump(
    action: Action,
    mut child: Child,
    mut lines: FramedRead<ChildStderr, LineSplitter>,
    tx: mpsc::Sender<Progress>,
    stop: Stop,
) -> Result<ExitStatus> {
    let cancel = &stop.cancel;
    let mut tracker = OperationTracker::new();
    let mut noise = NoiseTail::new(NOISE_TAIL_LINES);

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => return abandon(action, &mut child, &stop).await,
            next = lines.next() => next,
        };

        let line = match next {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                tracing::warn!(%action, "Failed to read progress output: {}", e);
                break;
            }
            None => break,
        };

        let Some(parsed) = parse_line(&line) else {
            tracing::trace!(%action, %line, "Ignoring non-progress line");
            noise.push(line);
            continue;
        };

        let progress = tracker.annotate(parsed);
        let sent = tokio::select! {
            biased;
            _ = cancel.cancelled() => return abandon(action, &mut child, &stop).await,
            sent = tx.send(progress) => sent,
        };
        if sent.is_err() {
            // Nobody is listening any more
            return abandon(action, &mut child, &stop).await;
        }
    }

    drop(tx);

    let exited = tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        status = child.wait() => Some(status),
    };
    let Some(status) = exited else {
        return abandon(action, &mut child, &stop).await;
    };
    let status = status?;
    tracing::debug!(%action, ?status, "VCS process exited");

    if status.success() {
        Ok(status)
    } else {
        Err(VcsError::Failed {
            action,
            code: status.code(),
            message: noise.message(),
        })
    }
}

/// How an invocation is stopped: the token that requests it, and the process
/// group to signal.
struct Stop {
    cancel: CancellationToken,
    group: Option<u32>,
    grace: Duration,
}

async fn abandon(action: Action, child: &mut Child, stop: &Stop) -> Result<ExitStatus> {
    tracing::debug!(%action, "Invocation cancelled, terminating VCS process");
    terminate(child, stop.group, stop.grace).await;
    Err(VcsError::Cancelled)
}

/// Ask the process group to exit, then kill whatever is left of it after
/// `grace`.
async fn terminate(child: &mut Child, group: Option<u32>, grace: Duration) {
    if signal_group(group, GroupSignal::Terminate) {
        match tokio::time::timeout(grace, child.wait()).await {
            Ok(Ok(_)) => {
                // The leader is gone, its helpers may not be
                signal_group(group, GroupSignal::Kill);
                return;
            }
            Ok(Err(e)) => tracing::warn!("Failed waiting for VCS process: {}", e),
            Err(_) => tracing::debug!("VCS process ignored SIGTERM, killing"),
        }
    }
    signal_group(group, GroupSignal::Kill);
    if let Err(e) = child.kill().await {
        tracing::warn!("Failed to kill VCS process: {}", e);
    }
}

/// Cancellation signals the whole group, so it reaches the helpers git starts.
#[cfg(unix)]
fn own_process_group(command: &mut std::process::Command) {
    use std::os::unix::process::CommandExt;

    command.process_group(0);
}

#[cfg(not(unix))]
fn own_process_group(_command: &mut std::process::Command) {}

#[derive(Debug, Clone, Copy)]
enum GroupSignal {
    Terminate,
    Kill,
}

#[cfg(unix)]
fn signal_group(group: Option<u32>, signal: GroupSignal) -> bool {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Some(pgid) = group.and_then(|pid| i32::try_from(pid).ok()) else {
        return false;
    };
    let signal = match signal {
        GroupSignal::Terminate => Signal::SIGTERM,
        GroupSignal::Kill => Signal::SIGKILL,
    };
    killpg(Pid::from_raw(pgid), signal).is_ok()
}

#[cfg(not(unix))]
fn signal_group(_group: Option<u32>, _signal: GroupSignal) -> bool {
    false
}

/// The last few non-progress lines, kept to explain a failed exit.
struct NoiseTail {
    lines: VecDeque<String>,
    limit: usize,
}

impl NoiseTail {
    fn new(limit: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(limit),
            limit,
        }
    }

    fn push(&mut self, line: String) {
        if line.trim().is_empty() {
            return;
        }
        if self.lines.len() == self.limit {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    fn message(&self) -> String {
        let joined: Vec<&str> = self.lines.iter().map(|l| l.as_str()).collect();
        joined.join("\n").trim().to_string()
    }
}
