#![cfg(unix)]

use serial_test::serial;

use crate::harness::{stdout_lines, CliTestHarness};

#[test]
#[serial]
fn test_cli_clone_json_progress() {
    let h = CliTestHarness::new("clone_json");
    h.fake_git(
        r"printf 'Cloning into jig...\nremote: Counting objects: 50%% (5/10)\nremote: Counting objects: 100%% (10/10), done.\n' >&2",
    );

    let output = h.run_cli(&["clone", "--json", "https://example.com/jig.git"]);
    assert!(
        output.status.success(),
        "jig clone failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let events: Vec<serde_json::Value> = stdout_lines(&output)
        .iter()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["operation"], "Counting objects");
    assert_eq!(events[0]["is_begin"], true);
    assert_eq!(events[0]["current"], 5);
    assert_eq!(events[1]["is_begin"], false);
    assert_eq!(events[1]["detail"], ", done.");
}

#[test]
#[serial]
fn test_cli_pull_renders_progress_on_stderr() {
    let h = CliTestHarness::new("pull_text");
    h.fake_git(r"printf 'Receiving objects: 50%% (1/2)\nEnumerating objects: 7\n' >&2");

    let output = h.run_cli(&["pull", "origin", "main"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Receiving objects:  50% (1/2)"), "{}", stderr);
    assert!(stderr.contains("Enumerating objects: 7"), "{}", stderr);
}

#[test]
#[serial]
fn test_cli_checkout_failure_exits_nonzero() {
    let h = CliTestHarness::new("checkout_fail");
    h.fake_git("echo \"error: pathspec 'nope' did not match\" >&2\nexit 1");

    let output = h.run_cli(&["checkout", "nope"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("checkout failed"), "{}", stderr);
    assert!(stderr.contains("did not match"), "{}", stderr);
}
