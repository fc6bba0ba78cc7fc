//! Version control actions with live progress reporting.
//!
//! An action spawns the VCS executable in its progress mode and turns its
//! diagnostic output into a stream of [`Progress`] events:
//!
//! ```text
//! stderr bytes -> LineSplitter -> parse_line -> OperationTracker -> Invocation
//! ```

pub mod error;
mod git;
mod invocation;
pub mod parser;
pub mod splitter;
pub mod tracker;

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

pub use error::{Result, VcsError};
pub use git::{command_args, Git};
pub use invocation::Invocation;
pub use parser::{parse_line, ParsedLine};
pub use splitter::LineSplitter;
pub use tracker::OperationTracker;

/// The state of one named operation, taken from one line of VCS output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// First event seen for `operation` in this invocation
    pub is_begin: bool,
    pub operation: String,
    pub current: u64,
    /// Zero when the VCS only reported a count
    pub total: u64,
    pub detail: String,
}

impl Progress {
    /// Completion as a percentage, if the total is known.
    pub fn percent(&self) -> Option<u64> {
        if self.total == 0 {
            return None;
        }
        let done = u128::from(self.current.min(self.total));
        Some((done * 100 / u128::from(self.total)) as u64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Clone,
    Pull,
    Checkout,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Clone => "clone",
            Action::Pull => "pull",
            Action::Checkout => "checkout",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A repository to act on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Repo {
    /// Fetch location (URL or path)
    pub url: String,
    /// Working tree: clone destination, or where pull/checkout run
    pub path: Option<PathBuf>,
    /// Branch or ref for pull/checkout
    pub reference: Option<String>,
}

impl Repo {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// A version control driver.
///
/// Each action spawns one process and returns its progress stream. The
/// invocation stops and the process is terminated when `cancel` fires or the
/// returned [`Invocation`] is dropped.
pub trait Vcs {
    fn run(&self, action: Action, repo: &Repo, cancel: CancellationToken) -> Result<Invocation>;

    fn clone_repo(&self, repo: &Repo, cancel: CancellationToken) -> Result<Invocation> {
        self.run(Action::Clone, repo, cancel)
    }

    fn pull(&self, repo: &Repo, cancel: CancellationToken) -> Result<Invocation> {
        self.run(Action::Pull, repo, cancel)
    }

    fn checkout(&self, repo: &Repo, cancel: CancellationToken) -> Result<Invocation> {
        self.run(Action::Checkout, repo, cancel)
    }
}
