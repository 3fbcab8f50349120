use blk2sh::error::ErrorKind;
use common::{
    assert_contains, compile_fixture, compile_str, compile_str_err, read_fixture, TargetShell,
};

mod common;

#[test]
fn posix_rejects_lists() {
    let err = compile_str_err(&read_fixture("lists.json"), TargetShell::Posix, true);
    assert_eq!(err.kind, ErrorKind::Unsupported);
    assert_contains(&err.message, "not supported in the posix target");
    assert_eq!(err.target, Some(TargetShell::Posix));
}

#[test]
fn posix_rejects_the_power_operator() {
    let src = r#"[
        {"type": "variables_set", "fields": {"VAR": "p"},
         "inputs": {"value": {"type": "math_arithmetic", "fields": {"OP": "POWER"},
                              "inputs": {"a": {"type": "math_number", "fields": {"NUM": 2}},
                                         "b": {"type": "math_number", "fields": {"NUM": 8}}}}}}
    ]"#;
    let err = compile_str_err(src, TargetShell::Posix, true);
    assert_eq!(err.kind, ErrorKind::Unsupported);
    assert_contains(&err.message, "power");
    // the same tree compiles for bash
    let out = compile_str(src, TargetShell::Bash, true);
    assert_contains(&out, "p=$((2 ** 8))");
}

#[test]
fn posix_rejects_random_integers() {
    let src = r#"[
        {"type": "variables_set", "fields": {"VAR": "r"},
         "inputs": {"value": {"type": "math_random_int",
                              "inputs": {"from": {"type": "math_number", "fields": {"NUM": 1}},
                                         "to": {"type": "math_number", "fields": {"NUM": 6}}}}}}
    ]"#;
    let err = compile_str_err(src, TargetShell::Posix, true);
    assert_eq!(err.kind, ErrorKind::Unsupported);
}

#[test]
fn repeat_lowers_to_while_on_posix() {
    let out = compile_fixture("repeat.json", TargetShell::Posix, true);
    assert_contains(
        &out,
        "count=0\nwhile [ $count -lt 3 ]; do\n  echo \"hi\"\n  count=$(( count + 1 ))\ndone\n",
    );
}

#[test]
fn repeat_keeps_c_style_for_on_bash() {
    let out = compile_fixture("repeat.json", TargetShell::Bash, true);
    assert_contains(&out, "for (( count=0; count<3; count++ )); do\n  echo \"hi\"\ndone\n");
}

#[test]
fn posix_output_uses_sh_shebang() {
    let out = compile_fixture("repeat.json", TargetShell::Posix, true);
    assert!(out.starts_with("#!/bin/sh\n"), "output was:\n{}", out);
}

#[test]
fn posix_still_compiles_plain_text_blocks() {
    let out = compile_fixture("print.json", TargetShell::Posix, true);
    assert_contains(&out, "echo \"hi\"");
}
