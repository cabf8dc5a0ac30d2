use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("patadmin")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("users"))
        .stdout(predicate::str::contains("--api-url"));
}

#[test]
fn test_users_help_shows_subcommands() {
    cargo_bin_cmd!("patadmin")
        .args(["users", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("remove"));
}

#[test]
fn test_remove_help_mentions_confirmation() {
    cargo_bin_cmd!("patadmin")
        .args(["users", "remove", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--yes"));
}

#[test]
fn test_login_requires_email() {
    cargo_bin_cmd!("patadmin")
        .arg("login")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--email"));
}
