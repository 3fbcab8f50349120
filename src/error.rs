use crate::target::TargetShell;
use std::fmt;

/// Broad failure categories surfaced by the generator.
///
/// Every failure is a local contract violation or an unsupported-construct
/// report; nothing is transient, nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A rank value outside the valid domain (NaN, infinite) was supplied.
    InvalidRank,
    /// The loaded tree names a construct the catalog does not contain.
    UnknownConstruct,
    /// The input document could not be decoded into a block tree.
    Load,
    /// The construct exists but the selected target shell cannot express it.
    Unsupported,
    /// A generator-internal invariant broke. Always a bug.
    Internal,
}

#[derive(Debug, Clone)]
pub struct CompileError {
    pub kind: ErrorKind,
    pub message: String,
    pub target: Option<TargetShell>,
    pub location: Option<String>,
}

impl CompileError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            target: None,
            location: None,
        }
    }

    pub fn invalid_rank(value: f64) -> Self {
        Self::new(
            ErrorKind::InvalidRank,
            format!("rank value {} is not a finite number", value),
        )
    }

    pub fn unknown_construct(name: &str, suggestion: Option<&str>) -> Self {
        let message = match suggestion {
            Some(s) => format!("unknown block type '{}' (did you mean '{}'?)", name, s),
            None => format!("unknown block type '{}'", name),
        };
        Self::new(ErrorKind::UnknownConstruct, message)
    }

    pub fn load(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Load, message)
    }

    pub fn unsupported(feature: impl Into<String>, target: TargetShell) -> Self {
        Self {
            kind: ErrorKind::Unsupported,
            message: format!("{} is not supported in the {} target", feature.into(), target),
            target: Some(target),
            location: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "compile error: {}", self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " at {}", loc)?;
        }
        Ok(())
    }
}

impl std::error::Error for CompileError {}
