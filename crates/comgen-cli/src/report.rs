//! Rendering run results for people and for scripts

use anyhow::{Context, Result};
use comgen_codegen::GenerationResult;
use comgen_logging::LogRecord;
use serde::Serialize;
use std::fmt::Write;

/// Log record as carried in the JSON report
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: String,
    pub target: String,
    pub message: String,
}

impl From<&LogRecord> for LogEntry {
    fn from(record: &LogRecord) -> Self {
        Self {
            level: record.level.to_string(),
            target: record.target.clone(),
            message: record.message.clone(),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    success: bool,
    #[serde(flatten)]
    result: &'a GenerationResult,
    log: &'a [LogEntry],
}

pub fn json(result: &GenerationResult, log: &[LogEntry]) -> Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        success: result.is_success(),
        result,
        log,
    })
    .context("Failed to serialize report")
}

/// One line per diagnostic, then the written files and a summary
pub fn human(result: &GenerationResult) -> String {
    let mut out = String::new();
    for diagnostic in &result.diagnostics {
        let _ = writeln!(out, "{diagnostic}");
    }
    for path in &result.files_written {
        let _ = writeln!(out, "wrote {}", path.display());
    }

    let errors = result.errors().count();
    let warnings = result.warnings().count();
    let status = if result.aborted {
        "aborted"
    } else if errors > 0 {
        "failed"
    } else {
        "ok"
    };
    let _ = writeln!(
        out,
        "{status}: {} file(s) written, {errors} error(s), {warnings} warning(s)",
        result.files_written.len()
    );
    out
}
