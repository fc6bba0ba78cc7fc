use serial_test::serial;

use crate::harness::{stdout_lines, CliTestHarness};

fn harness_with_repos(name: &str) -> CliTestHarness {
    let h = CliTestHarness::new(name);
    h.add_repo("api");
    h.add_repo("tools/jig");
    h.add_repo("web/app");
    h
}

#[test]
#[serial]
fn test_cli_list_in_discovery_order() {
    let h = harness_with_repos("list");

    let output = h.run_cli(&["list"]);
    assert!(
        output.status.success(),
        "jig list failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout_lines(&output), vec!["api", "tools/jig", "web/app"]);
}

#[test]
#[serial]
fn test_cli_ls_alias_with_limit() {
    let h = harness_with_repos("ls_limit");

    let output = h.run_cli(&["ls", "-n", "2"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["api", "tools/jig"]);
}

#[test]
#[serial]
fn test_cli_list_fuzzy_query() {
    let h = harness_with_repos("list_query");

    let output = h.run_cli(&["list", "tjg"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["tools/jig"]);
}

#[test]
#[serial]
fn test_cli_list_exact_query() {
    let h = harness_with_repos("list_exact");

    let output = h.run_cli(&["list", "--exact", "tjg"]);
    assert!(output.status.success());
    assert!(stdout_lines(&output).is_empty());

    let output = h.run_cli(&["list", "-x", "app"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["web/app"]);
}

#[test]
#[serial]
fn test_cli_completion() {
    let h = CliTestHarness::new("completion");

    let output = h.run_cli(&["completion", "bash"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("jig"));
}
