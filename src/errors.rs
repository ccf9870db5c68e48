//! Graft error handling.
//!
//! One error type for the whole crate, in the shape the CLI can hand
//! straight to miette. Every failure carries a kind, the unit it belongs to
//! (when it is scoped to one), and a stable diagnostic code.

use std::fmt;

use miette::Diagnostic;

/// The single error type: what went wrong, where, and how to report it.
#[derive(Debug)]
pub struct GraftError {
    pub kind: ErrorKind,
    /// Origin path of the source unit the error is scoped to, if any.
    /// Configuration errors are run-wide and carry no unit.
    pub unit: Option<String>,
    pub diagnostic_info: DiagnosticInfo,
}

/// All error kinds as a clean enum.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// No semantic-resolution model was supplied for a run that needs one.
    MissingModel,
    /// A type declaration had no corresponding symbol in the model.
    UnresolvedType { path: String },
    /// A surviving type reached synthesis without exactly one "Type"
    /// annotation. Indicates lost or duplicated stage-1 metadata.
    MalformedAnnotations {
        category: String,
        type_name: String,
        found: usize,
    },
    /// The driver could not read a unit file.
    Io { path: String, message: String },
    /// The driver read a unit file that did not deserialize to a tree.
    MalformedUnit { path: String, message: String },
}

/// Diagnostic enhancement data.
#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

/// Error categories, used by the driver to decide between aborting the run
/// and skipping one unit, and by tests for assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Fatal to the whole run; nothing is processed.
    Configuration,
    /// Fatal to one source unit only; the run continues.
    Resolution,
    /// A pipeline invariant was violated. Should never occur.
    Internal,
    /// Reading or decoding a unit file failed; that unit is skipped.
    Driver,
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingModel => ErrorCategory::Configuration,
            Self::UnresolvedType { .. } => ErrorCategory::Resolution,
            Self::MalformedAnnotations { .. } => ErrorCategory::Internal,
            Self::Io { .. } | Self::MalformedUnit { .. } => ErrorCategory::Driver,
        }
    }

    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::MissingModel => "missing_model",
            Self::UnresolvedType { .. } => "unresolved_type",
            Self::MalformedAnnotations { .. } => "malformed_annotations",
            Self::Io { .. } => "io",
            Self::MalformedUnit { .. } => "malformed_unit",
        }
    }

    const fn phase(&self) -> &'static str {
        match self {
            Self::MissingModel => "config",
            Self::UnresolvedType { .. } => "annotate",
            Self::MalformedAnnotations { .. } => "synthesize",
            Self::Io { .. } | Self::MalformedUnit { .. } => "driver",
        }
    }
}

impl GraftError {
    fn new(kind: ErrorKind, unit: Option<String>, help: Option<String>) -> Self {
        let error_code = format!("graft::{}::{}", kind.phase(), kind.code_suffix());
        Self {
            kind,
            unit,
            diagnostic_info: DiagnosticInfo { help, error_code },
        }
    }

    pub fn missing_model() -> Self {
        Self::new(
            ErrorKind::MissingModel,
            None,
            Some("bind or supply a semantic model before running the pipeline".into()),
        )
    }

    pub fn unresolved_type(path: impl fmt::Display, unit: &str) -> Self {
        Self::new(
            ErrorKind::UnresolvedType {
                path: path.to_string(),
            },
            Some(unit.to_string()),
            Some("the model must be bound to the exact original tree being annotated".into()),
        )
    }

    pub fn malformed_annotations(category: &str, type_name: &str, found: usize, unit: &str) -> Self {
        Self::new(
            ErrorKind::MalformedAnnotations {
                category: category.to_string(),
                type_name: type_name.to_string(),
                found,
            },
            Some(unit.to_string()),
            Some("this is an internal pipeline error; please report it as a bug".into()),
        )
    }

    pub fn io(path: &str, source: &std::io::Error) -> Self {
        Self::new(
            ErrorKind::Io {
                path: path.to_string(),
                message: source.to_string(),
            },
            Some(path.to_string()),
            None,
        )
    }

    pub fn malformed_unit(path: &str, source: &serde_json::Error) -> Self {
        Self::new(
            ErrorKind::MalformedUnit {
                path: path.to_string(),
                message: source.to_string(),
            },
            Some(path.to_string()),
            Some("unit files are JSON-serialized source trees; see `graft render`".into()),
        )
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// True when the error dooms the whole run rather than one unit.
    pub fn is_fatal_to_run(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }
}

impl std::error::Error for GraftError {}

impl fmt::Display for GraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::MissingModel => {
                write!(f, "Configuration error: no semantic model available")
            }
            ErrorKind::UnresolvedType { path } => {
                write!(f, "Resolution error: no symbol for type declaration '{}'", path)
            }
            ErrorKind::MalformedAnnotations {
                category,
                type_name,
                found,
            } => write!(
                f,
                "Internal error: expected exactly one '{}' annotation on type '{}', found {}",
                category, type_name, found
            ),
            ErrorKind::Io { path, message } => {
                write!(f, "Driver error: failed to read '{}': {}", path, message)
            }
            ErrorKind::MalformedUnit { path, message } => {
                write!(f, "Driver error: '{}' is not a valid unit file: {}", path, message)
            }
        }?;
        if let Some(unit) = &self.unit {
            if !matches!(self.kind, ErrorKind::Io { .. } | ErrorKind::MalformedUnit { .. }) {
                write!(f, " (unit '{}')", unit)?;
            }
        }
        Ok(())
    }
}

impl Diagnostic for GraftError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }
}

/// Prints a GraftError with full miette diagnostics. Use this for
/// user-facing error display in the CLI.
pub fn print_error(error: GraftError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
