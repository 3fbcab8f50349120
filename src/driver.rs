use crate::codegen::{CodegenOptions, Generator};
use crate::loader;
use crate::target::TargetShell;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Default,
    Check,
    EmitBlocks,
    EmitSh,
}

#[derive(Debug)]
pub struct CompileOptions {
    pub target: TargetShell,
    pub one_based_index: bool,
    pub out_path: Option<PathBuf>,
    pub chmod_x: bool,
    pub mode: Mode,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            target: TargetShell::Bash,
            one_based_index: true,
            out_path: None,
            chmod_x: false,
            mode: Mode::Default,
        }
    }
}

pub struct DriverError {
    pub code: i32,
    pub msg: String,
}

impl DriverError {
    fn compile(msg: String) -> Self {
        Self { code: 2, msg }
    }

    fn io(msg: String) -> Self {
        Self { code: 1, msg }
    }
}

pub fn compile_file(path: &Path, options: CompileOptions) -> Result<String, DriverError> {
    if !path.exists() {
        return Err(DriverError::io(format!("File not found: {}", path.display())));
    }
    let source = std::fs::read_to_string(path)
        .map_err(|e| DriverError::io(format!("Unable to read file: {} ({})", path.display(), e)))?;

    let program = loader::parse_program(&source)
        .map_err(|e| DriverError::compile(e.to_string()))?;

    if let Mode::EmitBlocks = options.mode {
        return Ok(format!("{:#?}", program));
    }

    let mut generator = Generator::new(CodegenOptions {
        target: options.target,
        one_based_index: options.one_based_index,
    });
    let out = generator
        .generate(&program)
        .map_err(|e| DriverError::compile(e.to_string()))?;

    if let Mode::Check = options.mode {
        return Ok("OK".to_string());
    }

    if let Some(out_path) = &options.out_path {
        std::fs::write(out_path, &out).map_err(|e| {
            DriverError::io(format!("Failed to write to {}: {}", out_path.display(), e))
        })?;

        #[cfg(unix)]
        {
            if options.chmod_x {
                if let Ok(metadata) = std::fs::metadata(out_path) {
                    let mut perms = metadata.permissions();
                    perms.set_mode(perms.mode() | 0o111);
                    let _ = std::fs::set_permissions(out_path, perms);
                }
            }
        }
    }

    Ok(out)
}
