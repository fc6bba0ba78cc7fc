use std::pin::Pin;
use std::process::ExitStatus;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::error::{Result, VcsError};
use super::{Action, Progress};

/// One running VCS action and its progress stream.
///
/// Events arrive in the order the VCS printed them and the stream ends when
/// the process closes its diagnostic output. Dropping the invocation cancels
/// it and terminates the process.
pub struct Invocation {
    action: Action,
    pid: Option<u32>,
    events: mpsc::Receiver<Progress>,
    cancel: CancellationToken,
    task: Option<JoinHandle<Result<ExitStatus>>>,
}

impl Invocation {
    pub(super) fn new(
        action: Action,
        pid: Option<u32>,
        events: mpsc::Receiver<Progress>,
        cancel: CancellationToken,
        task: JoinHandle<Result<ExitStatus>>,
    ) -> Self {
        Self {
            action,
            pid,
            events,
            cancel,
            task: Some(task),
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Process id of the spawned VCS process.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Next progress event, or `None` once the stream has closed.
    pub async fn recv(&mut self) -> Option<Progress> {
        self.events.recv().await
    }

    /// Stop the invocation and terminate the process. Idempotent.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Discard any unread events and wait for the process to finish.
    ///
    /// Returns the exit status on success. A non-zero exit is reported as
    /// [`VcsError::Failed`], cancellation as [`VcsError::Cancelled`].
    pub async fn wait(mut self) -> Result<ExitStatus> {
        while self.events.recv().await.is_some() {}

        let task = self
            .task
            .take()
            .ok_or_else(|| VcsError::Task("invocation already awaited".to_string()))?;
        match task.await {
            Ok(result) => result,
            Err(e) => Err(VcsError::Task(e.to_string())),
        }
    }
}

impl Stream for Invocation {
    type Item = Progress;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Progress>> {
        self.events.poll_recv(cx)
    }
}

impl Drop for Invocation {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
