use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// A scratch workspace with its own config file for one test.
pub struct CliTestHarness {
    temp: TempDir,
    config_path: PathBuf,
}

impl CliTestHarness {
    pub fn new(name: &str) -> Self {
        let temp = tempfile::Builder::new()
            .prefix(&format!("jig-e2e-{}-", name))
            .tempdir()
            .expect("failed to create temp dir");
        fs::create_dir_all(temp.path().join("work")).unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "").unwrap();
        Self { temp, config_path }
    }

    /// Directory commands run in.
    pub fn work_dir(&self) -> PathBuf {
        self.temp.path().join("work")
    }

    /// Create a repository (a directory with a `.git` child) below the work dir.
    pub fn add_repo(&self, rel: &str) {
        fs::create_dir_all(self.work_dir().join(rel).join(".git")).unwrap();
    }

    /// Use a shell script with `body` as the git executable.
    #[cfg(unix)]
    pub fn fake_git(&self, body: &str) {
        use std::os::unix::fs::PermissionsExt;

        let script = self.temp.path().join("fake-git");
        fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        fs::write(
            &self.config_path,
            format!("[git]\nbinary = \"{}\"\nkill_grace_ms = 200\n", script.display()),
        )
        .unwrap();
    }

    pub fn run_cli(&self, args: &[&str]) -> Output {
        self.run_cli_in(&self.work_dir(), args)
    }

    pub fn run_cli_in(&self, dir: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_jig"))
            .args(args)
            .current_dir(dir)
            .env("JIG_CONFIG", &self.config_path)
            .env_remove("JIG_LOG")
            .output()
            .expect("failed to run jig")
    }
}

pub fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|l| l.to_string())
        .collect()
}
