use blk2sh::driver::{self, CompileOptions, DriverError, Mode};
use blk2sh::target::TargetShell;
use std::process;

struct Config {
    filename: String,
    options: CompileOptions,
}

struct CliError {
    code: i32,
    msg: String,
    show_usage: bool,
}

impl CliError {
    fn usage(msg: impl Into<String>) -> Self {
        Self { code: 1, msg: msg.into(), show_usage: true }
    }

    fn from_driver(err: DriverError) -> Self {
        Self { code: err.code, msg: err.msg, show_usage: false }
    }
}

fn usage_text() -> &'static str {
    "Usage: blk2sh [flags] <blocks.json> [flags]\n\
     Flags:\n\
     \x20 --target <bash|posix>  Select output shell dialect (default: bash)\n\
     \x20 --one-based            Treat user-facing indices as 1-based (default)\n\
     \x20 --zero-based           Treat user-facing indices as 0-based\n\
     \x20 -o, --out <file>       Write output to file instead of stdout (auto-chmod +x)\n\
     \x20 --check                Check the block tree without emitting code\n\
     \x20 --no-chmod-x           Do not set executable bit on output file\n\
     \x20 --chmod-x              Set executable bit on output file (default)\n\
     \x20 --emit-blocks          Emit the loaded block tree (debug)\n\
     \x20 --emit-sh              Emit shell (default)\n\
     \x20 -h, --help             Print help information\n\
     \x20 -V, --version          Print version information and exit"
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let config = match parse_args(args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e.msg);
            if e.show_usage {
                eprintln!("{}", usage_text());
            }
            process::exit(e.code);
        }
    };

    if let Err(e) = compile(config) {
        eprintln!("{}", e.msg);
        if e.show_usage {
            eprintln!("{}", usage_text());
        }
        process::exit(e.code);
    }
}

fn parse_target(value: &str) -> Result<TargetShell, CliError> {
    value
        .parse()
        .map_err(|e: String| CliError::usage(format!("error: {}", e)))
}

fn parse_args(args: Vec<String>) -> Result<Config, CliError> {
    if args.len() < 2 {
        return Err(CliError::usage("error: missing input file"));
    }

    let mut filename: Option<String> = None;
    let mut options = CompileOptions::default();
    // CLI parity with documented default; the library default stays false.
    options.chmod_x = true;

    let mut check = false;
    let mut emit_blocks = false;
    let mut emit_sh = false;
    let mut chmod_x_flag: Option<bool> = None;

    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        if arg == "-h" || arg == "--help" {
            println!("{}", usage_text());
            process::exit(0);
        } else if arg == "-V" || arg == "--version" {
            println!("blk2sh {}", env!("CARGO_PKG_VERSION"));
            process::exit(0);
        } else if arg == "--target" {
            if i + 1 < args.len() {
                options.target = parse_target(&args[i + 1])?;
                i += 2;
            } else {
                return Err(CliError::usage("error: --target requires an argument"));
            }
        } else if let Some(value) = arg.strip_prefix("--target=") {
            if value.is_empty() {
                return Err(CliError::usage("error: --target requires an argument"));
            }
            options.target = parse_target(value)?;
            i += 1;
        } else if arg == "--one-based" {
            options.one_based_index = true;
            i += 1;
        } else if arg == "--zero-based" {
            options.one_based_index = false;
            i += 1;
        } else if arg == "-o" || arg == "--out" {
            if i + 1 < args.len() {
                options.out_path = Some(std::path::PathBuf::from(&args[i + 1]));
                i += 2;
            } else {
                return Err(CliError::usage(format!("error: {} requires an argument", arg)));
            }
        } else if arg == "--chmod-x" {
            chmod_x_flag = Some(true);
            i += 1;
        } else if arg == "--no-chmod-x" {
            chmod_x_flag = Some(false);
            i += 1;
        } else if arg == "--check" {
            check = true;
            i += 1;
        } else if arg == "--emit-blocks" {
            emit_blocks = true;
            i += 1;
        } else if arg == "--emit-sh" {
            emit_sh = true;
            i += 1;
        } else if arg.starts_with('-') {
            return Err(CliError::usage(format!("error: unknown flag {}", arg)));
        } else if filename.is_none() {
            filename = Some(arg.clone());
            i += 1;
        } else {
            return Err(CliError::usage(format!("error: unexpected argument {}", arg)));
        }
    }

    if let Some(flag) = chmod_x_flag {
        options.chmod_x = flag;
    }

    let selected = [check, emit_blocks, emit_sh].iter().filter(|&&f| f).count();
    if selected > 1 {
        return Err(CliError::usage(
            "error: --check, --emit-blocks, and --emit-sh are mutually exclusive",
        ));
    }
    options.mode = if check {
        Mode::Check
    } else if emit_blocks {
        Mode::EmitBlocks
    } else if emit_sh {
        Mode::EmitSh
    } else {
        Mode::Default
    };

    let filename = filename.ok_or_else(|| CliError::usage("error: missing input file"))?;
    Ok(Config { filename, options })
}

fn compile(config: Config) -> Result<(), CliError> {
    let to_stdout = config.options.out_path.is_none();
    let out = driver::compile_file(std::path::Path::new(&config.filename), config.options)
        .map_err(CliError::from_driver)?;
    if to_stdout {
        print!("{}", out);
        if !out.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}
