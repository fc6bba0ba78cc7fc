//! End-to-end tests for jig.
//!
//! These run the `jig` binary as a subprocess against temporary directory
//! trees. VCS commands use a fake `git` script configured through
//! `JIG_CONFIG`, so no network access or real git is needed.
//!
//! # Running
//!
//! ```sh
//! cargo test --test e2e
//! ```

mod harness;

mod cli;
mod errors;
mod progress;
