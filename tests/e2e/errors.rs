use serial_test::serial;

use crate::harness::CliTestHarness;

#[test]
#[serial]
fn test_cli_missing_config_file() {
    let h = CliTestHarness::new("missing_config");

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_jig"))
        .args(["list", "--config", "/nonexistent/jig/config.toml"])
        .current_dir(h.work_dir())
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to read config file"),
        "expected config error.\nstderr: {}",
        stderr
    );
}

#[test]
#[serial]
fn test_cli_missing_git_binary() {
    let h = CliTestHarness::new("missing_git");
    let config = h.work_dir().join("jig.toml");
    std::fs::write(&config, "[git]\nbinary = \"/nonexistent/bin/git\"\n").unwrap();

    let output = h.run_cli(&[
        "clone",
        "--config",
        config.to_str().unwrap(),
        "https://example.com/jig.git",
    ]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to launch"), "stderr: {}", stderr);
}
