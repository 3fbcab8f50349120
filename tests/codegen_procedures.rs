use common::{assert_contains, compile_fixture, compile_str, TargetShell};

mod common;

#[test]
fn definition_is_hoisted_above_the_body() {
    let out = compile_fixture("procedures.json", TargetShell::Bash, true);
    let def_pos = out.find("function double {").expect("definition must be emitted");
    let call_pos = out.find("d=$( double 5 )").expect("call must be emitted");
    assert!(def_pos < call_pos, "definition must precede the call:\n{}", out);
}

#[test]
fn parameters_bind_positionals() {
    let out = compile_fixture("procedures.json", TargetShell::Bash, true);
    assert_contains(&out, "function double {\n  local n=\"$1\"\n  echo $((${n} * 2))\n}");
}

#[test]
fn posix_definitions_drop_the_function_keyword() {
    let out = compile_fixture("procedures.json", TargetShell::Posix, true);
    assert_contains(&out, "double() {\n  n=\"$1\"\n  echo $((${n} * 2))\n}");
}

#[test]
fn block_comment_prefixes_the_statement() {
    let out = compile_fixture("procedures.json", TargetShell::Bash, true);
    assert_contains(&out, "# show the doubled value\necho ${d}");
}

#[test]
fn reserved_variable_names_are_renamed_stably() {
    let src = r#"[
        {"type": "variables_set", "fields": {"VAR": "done"},
         "inputs": {"value": {"type": "math_number", "fields": {"NUM": 1}}}},
        {"type": "text_print",
         "inputs": {"value": {"type": "variables_get", "fields": {"VAR": "done"}}}}
    ]"#;
    let out = compile_str(src, TargetShell::Bash, true);
    assert_contains(&out, "done2=1");
    assert_contains(&out, "echo ${done2}");
}

#[test]
fn call_without_return_is_a_plain_statement() {
    let src = r#"[
        {"type": "procedures_defnoreturn", "fields": {"NAME": "greet", "PARAMS": []},
         "statements": {"do": [
             {"type": "text_print",
              "inputs": {"value": {"type": "text", "fields": {"TEXT": "hello"}}}}
         ]}},
        {"type": "procedures_callnoreturn", "fields": {"NAME": "greet"}}
    ]"#;
    let out = compile_str(src, TargetShell::Bash, true);
    assert_contains(&out, "function greet {\n  echo \"hello\"\n}");
    assert_contains(&out, "\ngreet\n");
}

#[test]
fn conditional_return_emits_guard() {
    let src = r#"[
        {"type": "procedures_defreturn", "fields": {"NAME": "pick", "PARAMS": ["x"]},
         "statements": {"do": [
             {"type": "procedures_ifreturn",
              "inputs": {"cond": {"type": "variables_get", "fields": {"VAR": "x"}},
                         "value": {"type": "math_number", "fields": {"NUM": 1}}}}
         ]},
         "inputs": {"return": {"type": "math_number", "fields": {"NUM": 0}}}}
    ]"#;
    let out = compile_str(src, TargetShell::Bash, true);
    assert_contains(&out, "if [ ${x} ]; then\n    echo 1\n    return 0\n  fi");
}
