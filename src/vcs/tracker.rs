//! Per-invocation operation tracking

use std::collections::HashSet;

use super::parser::ParsedLine;
use super::Progress;

/// Remembers which operation names one invocation has already reported.
#[derive(Debug, Default)]
pub struct OperationTracker {
    seen: HashSet<String>,
}

impl OperationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time `operation` is observed, false afterwards.
    pub fn observe(&mut self, operation: &str) -> bool {
        if self.seen.contains(operation) {
            return false;
        }
        self.seen.insert(operation.to_string())
    }

    /// Turn a parsed line into a [`Progress`] event, flagging the first one for
    /// its operation as a beginning.
    pub fn annotate(&mut self, line: ParsedLine) -> Progress {
        let is_begin = self.observe(&line.operation);
        Progress {
            is_begin,
            operation: line.operation,
            current: line.current,
            total: line.total,
            detail: line.detail,
        }
    }
}
