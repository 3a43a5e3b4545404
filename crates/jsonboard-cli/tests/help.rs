use assert_cmd::Command;

/// Helper to get a Command for the jsonboard binary.
#[allow(deprecated)]
fn jsonboard_cmd() -> Command {
    Command::cargo_bin("jsonboard").unwrap()
}

#[test]
fn help_works() {
    jsonboard_cmd().arg("--help").assert().success();
}

#[test]
fn record_help_lists_subcommands() {
    jsonboard_cmd()
        .args(["record", "--help"])
        .assert()
        .success()
        .stdout(predicates::str::contains("add"))
        .stdout(predicates::str::contains("update"));
}
