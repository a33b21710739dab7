use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn cli_argument_commands_work() {
    #[allow(deprecated)]
    let mut help = Command::cargo_bin("demo-oracle").expect("bin build");
    help.arg("help")
        .assert()
        .success()
        .stdout(contains("demo-oracle check <file>"));

    #[allow(deprecated)]
    let mut version = Command::cargo_bin("demo-oracle").expect("bin build");
    version
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("demo-oracle version"));

    #[allow(deprecated)]
    let mut about = Command::cargo_bin("demo-oracle").expect("bin build");
    about
        .arg("--about")
        .assert()
        .success()
        .stdout(contains("QuickJS-ng"));
}

#[test]
fn unknown_command_exits_with_usage_error() {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("demo-oracle").expect("bin build");
    cmd.arg("frobnicate")
        .assert()
        .code(2)
        .stderr(contains("unknown command"));
}

#[test]
fn check_without_path_is_a_usage_error() {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("demo-oracle").expect("bin build");
    cmd.arg("check").assert().code(2).stderr(contains("usage"));
}
