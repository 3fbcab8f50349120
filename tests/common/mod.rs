#![allow(dead_code)]
use blk2sh::codegen::{CodegenOptions, Generator};
use blk2sh::error::CompileError;
use blk2sh::loader;
pub use blk2sh::target::TargetShell;
use std::path::{Path, PathBuf};

pub fn crate_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).to_path_buf()
}

pub fn fixture_path(name: &str) -> PathBuf {
    crate_root().join("tests/fixtures").join(name)
}

pub fn read_fixture(name: &str) -> String {
    let path = fixture_path(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub fn compile_str(src: &str, target: TargetShell, one_based: bool) -> String {
    let program = loader::parse_program(src).expect("fixture must parse");
    Generator::new(CodegenOptions {
        target,
        one_based_index: one_based,
    })
    .generate(&program)
    .expect("fixture must compile")
}

pub fn compile_str_err(src: &str, target: TargetShell, one_based: bool) -> CompileError {
    let program = loader::parse_program(src).expect("fixture must parse");
    Generator::new(CodegenOptions {
        target,
        one_based_index: one_based,
    })
    .generate(&program)
    .expect_err("fixture must fail to compile")
}

pub fn compile_fixture(name: &str, target: TargetShell, one_based: bool) -> String {
    compile_str(&read_fixture(name), target, one_based)
}

pub fn assert_contains(haystack: &str, needle: &str) {
    assert!(
        haystack.contains(needle),
        "expected output to contain {:?}; output was:\n{}",
        needle,
        haystack
    );
}

pub fn assert_not_contains(haystack: &str, needle: &str) {
    assert!(
        !haystack.contains(needle),
        "expected output to NOT contain {:?}; output was:\n{}",
        needle,
        haystack
    );
}
