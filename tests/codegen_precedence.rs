use common::{assert_contains, assert_not_contains, compile_fixture, TargetShell};

mod common;

#[test]
fn associative_addition_chain_stays_flat() {
    let out = compile_fixture("precedence.json", TargetShell::Bash, false);
    // (1 + 2) + 3: additive child under an additive consumer keeps its text
    assert_contains(&out, "x=$(($((1 + 2)) + 3))");
    assert_not_contains(&out, "x=$((($((1 + 2))) + 3))");
}

#[test]
fn additive_child_wraps_under_multiplication() {
    let out = compile_fixture("precedence.json", TargetShell::Bash, false);
    assert_contains(&out, "y=$((($((1 + 2))) * 3))");
}

#[test]
fn double_negation_emits_without_inner_parens() {
    let out = compile_fixture("precedence.json", TargetShell::Bash, false);
    assert_contains(&out, "if [ !!${flag} ]; then");
    assert_not_contains(&out, "!(!");
}

#[test]
fn statement_bodies_are_indented() {
    let out = compile_fixture("precedence.json", TargetShell::Bash, false);
    assert_contains(&out, "then\n  echo \"t\"\nfi\n");
}

#[test]
fn output_starts_with_target_shebang() {
    let out = compile_fixture("precedence.json", TargetShell::Bash, false);
    assert!(out.starts_with("#!/usr/bin/env bash\n"), "output was:\n{}", out);
}
