use std::io;

use thiserror::Error;

use super::Action;

#[derive(Error, Debug)]
pub enum VcsError {
    #[error("Failed to launch `{program} {action}`: {source}")]
    Launch {
        program: String,
        action: Action,
        #[source]
        source: io::Error,
    },

    #[error("{action} failed ({}): {message}", describe_code(.code))]
    Failed {
        action: Action,
        code: Option<i32>,
        message: String,
    },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Progress task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, VcsError>;
