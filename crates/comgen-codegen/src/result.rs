//! Outcome of a generation run

use comgen_core::{Diagnostic, DiagnosticKind, Severity, has_fatal};
use serde::Serialize;
use std::path::PathBuf;

/// Files written plus everything worth telling the user
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationResult {
    pub files_written: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
    /// The run stopped before writing anything
    pub aborted: bool,
}

impl GenerationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the run with a closing diagnostic
    pub fn abort(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self.aborted = true;
        self
    }

    /// Stop the run with a batch of diagnostics
    pub fn abort_with(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics.extend(diagnostics);
        self.aborted = true;
        self
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn has_fatal(&self) -> bool {
        has_fatal(&self.diagnostics)
    }

    pub fn is_success(&self) -> bool {
        !self.aborted && !self.has_fatal()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_fatal())
    }

    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    /// Fold a later run into this one
    pub fn merge(&mut self, other: GenerationResult) {
        self.files_written.extend(other.files_written);
        self.diagnostics.extend(other.diagnostics);
        self.aborted |= other.aborted;
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn GenerationResult___warnings_only___is_success() {
        let mut result = GenerationResult::new();
        result.push(Diagnostic::warning(DiagnosticKind::ScalarSizeMismatch, "w"));

        assert!(result.is_success());
        assert_eq!(result.warnings().count(), 1);
        assert_eq!(result.errors().count(), 0);
    }

    #[test]
    fn GenerationResult___aborted___not_success_even_without_errors() {
        let result = GenerationResult::new()
            .abort(Diagnostic::warning(DiagnosticKind::OverwriteDeclined, "no"));

        assert!(!result.is_success());
        assert!(!result.has_fatal());
    }

    #[test]
    fn GenerationResult___fatal_diagnostic___not_success() {
        let mut result = GenerationResult::new();
        result.push(Diagnostic::error(DiagnosticKind::Io, "disk full"));

        assert!(!result.is_success());
        assert_eq!(result.count_of(DiagnosticKind::Io), 1);
    }

    #[test]
    fn GenerationResult___merge___combines_runs() {
        let mut first = GenerationResult::new();
        first.files_written.push(PathBuf::from("a.h"));
        let mut second = GenerationResult::new();
        second.files_written.push(PathBuf::from("b.h"));
        second.aborted = true;

        first.merge(second);

        assert_eq!(first.files_written.len(), 2);
        assert!(first.aborted);
    }
}
