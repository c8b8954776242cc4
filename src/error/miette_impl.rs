//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{SourceError, Stage};

/// A diagnostic wrapper for sequence errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct SourceDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

impl From<SourceError> for SourceDiagnostic {
    fn from(e: SourceError) -> Self {
        match e {
            SourceError::Io {
                stage,
                target,
                source,
            } => SourceDiagnostic {
                message: format!("[{}] on '{}'", stage, target),
                help: Some(
                    match stage {
                        Stage::Open => "Check that the source exists and is readable",
                        Stage::Read => "The source failed while being read",
                        Stage::Release => "The source could not be released cleanly",
                    }
                    .into(),
                ),
                source: Some(Box::new(source)),
                severity: Severity::Error,
            },
            SourceError::ShapeMismatch { .. } => SourceDiagnostic {
                message: e.to_string(),
                source: None,
                help: Some("Every CSV row must have as many fields as the header".into()),
                severity: Severity::Error,
            },
            SourceError::IllegalState(_) => SourceDiagnostic {
                message: e.to_string(),
                source: None,
                help: Some("This is a usage bug in the calling code".into()),
                severity: Severity::Error,
            },
            other => SourceDiagnostic {
                message: other.to_string(),
                source: None,
                help: None,
                severity: Severity::Error,
            },
        }
    }
}

impl From<SourceError> for miette::Report {
    fn from(e: SourceError) -> Self {
        miette::Report::new(SourceDiagnostic::from(e))
    }
}
