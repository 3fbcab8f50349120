use common::{assert_contains, compile_fixture, TargetShell};

mod common;

#[test]
fn literal_index_folds_zero_based() {
    let out = compile_fixture("index_access.json", TargetShell::Bash, false);
    assert_contains(&out, "first=\"${items[3]}\"");
}

#[test]
fn literal_index_folds_one_based() {
    let out = compile_fixture("index_access.json", TargetShell::Bash, true);
    assert_contains(&out, "first=\"${items[2]}\"");
}

#[test]
fn dynamic_index_passes_through_zero_based() {
    let out = compile_fixture("index_access.json", TargetShell::Bash, false);
    assert_contains(&out, "dyn=\"${items[${i}]}\"");
}

#[test]
fn dynamic_index_shifts_one_based() {
    let out = compile_fixture("index_access.json", TargetShell::Bash, true);
    assert_contains(&out, "dyn=\"${items[${i} - 1]}\"");
}

#[test]
fn arithmetic_index_keeps_its_own_parens_zero_based() {
    let out = compile_fixture("index_access.json", TargetShell::Bash, false);
    assert_contains(&out, "offset=\"${items[$((${i} + 2))]}\"");
}

#[test]
fn arithmetic_index_appends_correction_one_based() {
    let out = compile_fixture("index_access.json", TargetShell::Bash, true);
    assert_contains(&out, "offset=\"${items[$((${i} + 2)) - 1]}\"");
}

#[test]
fn from_end_literal_negates_folded_index() {
    let out = compile_fixture("index_access.json", TargetShell::Bash, false);
    // zero-based: element 1 from the end is #items - 2
    assert_contains(&out, "tail=\"${items[${#items[@]}-2]}\"");
    let out = compile_fixture("index_access.json", TargetShell::Bash, true);
    assert_contains(&out, "tail=\"${items[${#items[@]}-1]}\"");
}

#[test]
fn from_end_dynamic_wraps_negated_sum() {
    let out = compile_fixture("index_access.json", TargetShell::Bash, false);
    assert_contains(&out, "tail_dyn=\"${items[${#items[@]}-(${n} + 1)]}\"");
}

#[test]
fn from_end_dynamic_negates_bare_one_based() {
    let out = compile_fixture("index_access.json", TargetShell::Bash, true);
    assert_contains(&out, "tail_dyn=\"${items[${#items[@]}-${n}]}\"");
}

#[test]
fn char_at_uses_substring_expansion() {
    let out = compile_fixture("index_access.json", TargetShell::Bash, false);
    assert_contains(&out, "letter=${name:2:1}");
    let out = compile_fixture("index_access.json", TargetShell::Bash, true);
    assert_contains(&out, "letter=${name:1:1}");
}
