use assert_cmd::Command;
use predicates::prelude::*;

mod common;

fn blk2sh() -> Command {
    Command::cargo_bin("blk2sh").expect("binary must build")
}

#[test]
fn emits_bash_to_stdout_by_default() {
    blk2sh()
        .arg(common::fixture_path("print.json"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("#!/usr/bin/env bash\n"))
        .stdout(predicate::str::contains("echo \"hi\""));
}

#[test]
fn target_posix_switches_the_shebang() {
    blk2sh()
        .arg("--target")
        .arg("posix")
        .arg(common::fixture_path("print.json"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("#!/bin/sh\n"));
}

#[test]
fn check_mode_prints_ok() {
    blk2sh()
        .arg("--check")
        .arg(common::fixture_path("print.json"))
        .assert()
        .success()
        .stdout("OK\n");
}

#[test]
fn posix_unsupported_construct_exits_with_compile_error() {
    blk2sh()
        .arg("--target=posix")
        .arg(common::fixture_path("lists.json"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("not supported in the posix target"));
}

#[test]
fn missing_input_file_is_an_io_error() {
    blk2sh()
        .arg("no_such_file.json")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn unknown_flag_prints_usage() {
    blk2sh()
        .arg("--bogus")
        .arg(common::fixture_path("print.json"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage: blk2sh"));
}

#[test]
fn unknown_block_type_reports_a_suggestion() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("typo.json");
    std::fs::write(&path, r#"[{"type": "math_numbre", "fields": {"NUM": 1}}]"#).unwrap();
    blk2sh()
        .arg(&path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("did you mean 'math_number'?"));
}

#[cfg(unix)]
#[test]
fn out_file_is_written_executable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("script.sh");
    blk2sh()
        .arg(common::fixture_path("print.json"))
        .arg("-o")
        .arg(&out)
        .assert()
        .success();
    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("#!/usr/bin/env bash\n"));
    let mode = std::fs::metadata(&out).unwrap().permissions().mode();
    assert_ne!(mode & 0o111, 0, "output must be executable, mode was {:o}", mode);
}

#[cfg(unix)]
#[test]
fn no_chmod_x_leaves_output_non_executable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("script.sh");
    blk2sh()
        .arg(common::fixture_path("print.json"))
        .arg("--no-chmod-x")
        .arg("-o")
        .arg(&out)
        .assert()
        .success();
    let mode = std::fs::metadata(&out).unwrap().permissions().mode();
    assert_eq!(mode & 0o111, 0, "output must not be executable, mode was {:o}", mode);
}
