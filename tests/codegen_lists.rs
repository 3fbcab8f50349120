use blk2sh::codegen::{CodegenOptions, Generator};
use blk2sh::loader;
use common::{assert_contains, compile_fixture, read_fixture, TargetShell};

mod common;

#[test]
fn list_literal_renders_elements() {
    let out = compile_fixture("lists.json", TargetShell::Bash, true);
    assert_contains(&out, "items=(\"a\" \"b\" 3)");
}

#[test]
fn list_length_uses_array_expansion() {
    let out = compile_fixture("lists.json", TargetShell::Bash, true);
    assert_contains(&out, "size=\"${#items[@]}\"");
}

#[test]
fn index_of_emits_one_helper_for_two_uses() {
    let out = compile_fixture("lists.json", TargetShell::Bash, true);
    assert_contains(&out, "pos=$( list_index_of items \"b\" )");
    assert_contains(&out, "pos2=$( list_index_of items \"a\" )");
    let defs = out.matches("function list_index_of {").count();
    assert_eq!(defs, 1, "helper must be defined exactly once; output:\n{}", out);
}

#[test]
fn index_of_reports_positions_in_workspace_convention() {
    let out = compile_fixture("lists.json", TargetShell::Bash, true);
    // one-based: found positions shift up, missing reports 0
    assert_contains(&out, "echo $(( i + 1 ))");
    assert_contains(&out, "echo 0");
    let out = compile_fixture("lists.json", TargetShell::Bash, false);
    assert_contains(&out, "echo $(( i ))");
    assert_contains(&out, "echo -1");
}

#[test]
fn sort_passes_direction_and_kind_flags() {
    let out = compile_fixture("lists.json", TargetShell::Bash, true);
    assert_contains(&out, "| sort -r -n |");
}

#[test]
fn insert_splices_around_folded_index() {
    let out = compile_fixture("lists.json", TargetShell::Bash, true);
    assert_contains(&out, "items=(\"${items[@]:0:1}\" \"new\" \"${items[@]:1}\")");
}

#[test]
fn remove_from_end_uses_convention_adjusted_index() {
    let out = compile_fixture("lists.json", TargetShell::Bash, true);
    // one-based: the k-th element from the end sits at #items - k
    assert_contains(&out, "unset items[${#items[@]}-${k}]; items=(\"${items[@]}\")");
    let out = compile_fixture("lists.json", TargetShell::Bash, false);
    assert_contains(&out, "unset items[${#items[@]}-(${k} + 1)]; items=(\"${items[@]}\")");
}

#[test]
fn generation_passes_do_not_leak_state() {
    let program = loader::parse_program(&read_fixture("lists.json")).unwrap();
    let mut generator = Generator::new(CodegenOptions {
        target: TargetShell::Bash,
        one_based_index: true,
    });
    let first = generator.generate(&program).unwrap();
    let second = generator.generate(&program).unwrap();
    assert_eq!(first, second);
    let defs = second.matches("function list_index_of {").count();
    assert_eq!(defs, 1);
}
