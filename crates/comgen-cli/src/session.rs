//! Everything one CLI invocation shares: configuration, logging and the library

use crate::confirm::PromptConfirm;
use crate::report::{self, LogEntry};
use anyhow::{Context, Result, anyhow};
use comgen_codegen::{AlwaysConfirm, ConfirmOverwrite, GenerationResult};
use comgen_core::{GeneratorConfig, GeneratorError, Library, LogLevel, ProtocolFamily};
use comgen_logging::{LogRecord, LogSinkManager, init_logging};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Global command-line options
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub config: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
    pub assume_yes: bool,
    pub json: bool,
}

pub struct Session {
    pub config: GeneratorConfig,
    pub library: Library,
    library_path: PathBuf,
    options: Options,
    captured: Option<Arc<Mutex<Vec<LogRecord>>>>,
}

impl Session {
    pub fn open(options: &Options, library_path: &Path) -> Result<Self> {
        let config = load_config(options.config.as_deref())?;
        let level = options
            .log_level
            .or_else(|| config.level())
            .unwrap_or(LogLevel::Info);
        init_logging(level);

        // In JSON mode warnings also travel with the report.
        let captured = options.json.then(|| {
            let records = Arc::new(Mutex::new(Vec::new()));
            let sink_records = Arc::clone(&records);
            LogSinkManager::global().set_sink(Some(Arc::new(move |record: &LogRecord| {
                if record.level >= LogLevel::Warn {
                    sink_records.lock().push(record.clone());
                }
            })));
            records
        });

        let library = Library::load(library_path)
            .with_context(|| format!("Failed to load library: {}", library_path.display()))?;

        Ok(Self {
            config,
            library,
            library_path: library_path.to_path_buf(),
            options: options.clone(),
            captured,
        })
    }

    /// A built-in family, with the library's schema when it carries one
    pub fn family(&self, name: &str) -> Result<ProtocolFamily> {
        let family = ProtocolFamily::by_name(name)
            .with_context(|| format!("Unsupported protocol family: {name}"))?;
        Ok(match self.library.com_definition_named(&family.definition.vlnv.name) {
            Some(definition) => family.with_definition(definition.clone()),
            None => family,
        })
    }

    pub fn confirmation(&self) -> Box<dyn ConfirmOverwrite> {
        if self.options.assume_yes {
            Box::new(AlwaysConfirm)
        } else {
            Box::new(PromptConfirm::stdio())
        }
    }

    /// Save changed metadata, print the report and tell whether the run succeeded
    pub fn finish(mut self, result: &GenerationResult) -> Result<bool> {
        if self.library.is_dirty() {
            self.library
                .save(&self.library_path)
                .with_context(|| format!("Failed to save library: {}", self.library_path.display()))?;
            tracing::info!(path = %self.library_path.display(), "Library updated");
        }

        if self.options.json {
            let log: Vec<LogEntry> = self
                .captured
                .take()
                .map(|records| records.lock().iter().map(LogEntry::from).collect())
                .unwrap_or_default();
            println!("{}", report::json(result, &log)?);
            LogSinkManager::global().set_sink(None);
        } else {
            print!("{}", report::human(result));
        }
        Ok(result.is_success())
    }
}

/// Prefix a library error with its stable code, e.g. `[E003] unknown component: ...`
pub fn coded(err: GeneratorError) -> anyhow::Error {
    anyhow!("[E{:03}] {err}", err.error_code())
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let Some(path) = path else {
        return Ok(GeneratorConfig::default());
    };
    GeneratorConfig::from_file(path)
        .with_context(|| format!("Failed to load configuration: {}", path.display()))
}
