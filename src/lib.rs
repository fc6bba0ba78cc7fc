//! jig: find, fuzzy-search and sync the git repositories below a directory,
//! with live progress from git.

pub mod cli;
pub mod config;
pub mod finder;
pub mod matcher;
pub mod vcs;
