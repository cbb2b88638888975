//! Diagnostics produced by validation and generation runs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a diagnostic blocks generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Fatal for the run that produced it
    Error,
    /// Reported, generation continues
    Warning,
}

/// What went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Required communication property missing or empty
    MissingProperty,
    /// The two ends of a connection use different transfer types
    TransferTypeMismatch,
    /// The two ends of a scalar connection disagree on the scalar size
    ScalarSizeMismatch,
    /// A connection end names an instance or interface that doesn't exist
    UnresolvedEndpoint,
    /// Instance lacks a node or domain identifier
    MissingInstanceProperty,
    /// A generated file couldn't be written
    Io,
    /// The user declined to overwrite existing files
    OverwriteDeclined,
    /// Component/design metadata couldn't be read or written back
    Metadata,
    /// A channel failed or never completed a handshake phase
    Handshake,
}

/// A human-readable message naming the offending component, instance or interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            message: message.into(),
        }
    }

    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            message: message.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
        };
        write!(f, "[{}] {}", tag, self.message)
    }
}

/// `true` if any diagnostic in the list is fatal
pub fn has_fatal(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_fatal)
}
