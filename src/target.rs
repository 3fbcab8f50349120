#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetShell {
    Bash,
    Posix,
}

impl TargetShell {
    /// Shebang line for the generated script.
    pub fn shebang(self) -> &'static str {
        match self {
            TargetShell::Bash => "#!/usr/bin/env bash",
            TargetShell::Posix => "#!/bin/sh",
        }
    }
}

impl std::fmt::Display for TargetShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetShell::Bash => write!(f, "bash"),
            TargetShell::Posix => write!(f, "posix"),
        }
    }
}

impl std::str::FromStr for TargetShell {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bash" => Ok(TargetShell::Bash),
            "posix" | "sh" => Ok(TargetShell::Posix),
            other => Err(format!("unknown target shell '{}' (expected bash or posix)", other)),
        }
    }
}
