use assert_cmd::Command;
use predicates::prelude::*;

fn phpup() -> Command {
    Command::cargo_bin("phpup").unwrap()
}

#[test]
fn help_lists_subcommands() {
    phpup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("upgrade"))
        .stdout(predicate::str::contains("repair"));
}

#[test]
fn version_flag_reports_version() {
    phpup()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("phpup"));
}

#[test]
fn unknown_subcommand_fails() {
    phpup()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn install_requires_a_version() {
    phpup()
        .arg("install")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn completions_generate_bash_script() {
    phpup()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("phpup"));
}

#[test]
fn ini_get_reads_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let ini = dir.path().join("php.ini");
    std::fs::write(&ini, "[PHP]\nmemory_limit = 512M\n").unwrap();

    phpup()
        .args(["ini", "get", "memory_limit", "--file"])
        .arg(&ini)
        .assert()
        .success()
        .stdout(predicate::str::contains("512M"));
}

#[test]
fn ini_set_rewrites_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let ini = dir.path().join("php.ini");
    std::fs::write(&ini, "memory_limit = 512M\n").unwrap();

    phpup()
        .args(["ini", "set", "memory_limit", "1G", "--file"])
        .arg(&ini)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&ini).unwrap();
    assert!(contents.contains("memory_limit = 1G"));
}

#[test]
fn ini_set_dry_run_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let ini = dir.path().join("php.ini");
    std::fs::write(&ini, "memory_limit = 512M\n").unwrap();

    phpup()
        .args(["--dry-run", "ini", "set", "memory_limit", "1G", "--file"])
        .arg(&ini)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&ini).unwrap();
    assert!(contents.contains("memory_limit = 512M"));
}

#[test]
fn ini_with_missing_file_fails() {
    phpup()
        .args(["ini", "get", "memory_limit", "--file", "/nonexistent/php.ini"])
        .assert()
        .failure();
}
