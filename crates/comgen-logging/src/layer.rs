//! Tracing layer that forwards to the host sink, and subscriber setup

use crate::reload::{ReloadHandle, level_filter};
use crate::sink::LogSinkManager;
use comgen_core::LogLevel;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Tracing layer that forwards events to the host-registered sink
pub struct HostLogLayer {
    manager: &'static LogSinkManager,
}

impl HostLogLayer {
    /// Create a layer using the global sink manager
    pub fn new() -> Self {
        Self {
            manager: LogSinkManager::global(),
        }
    }

    pub fn with_manager(manager: &'static LogSinkManager) -> Self {
        Self { manager }
    }

    fn convert_level(level: &Level) -> LogLevel {
        match *level {
            Level::TRACE => LogLevel::Trace,
            Level::DEBUG => LogLevel::Debug,
            Level::INFO => LogLevel::Info,
            Level::WARN => LogLevel::Warn,
            Level::ERROR => LogLevel::Error,
        }
    }
}

impl Default for HostLogLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for HostLogLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::convert_level(metadata.level());
        if !self.manager.is_enabled(level) || !self.manager.has_sink() {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.manager
            .log(level, metadata.target(), &visitor.finish());
    }
}

/// Collects the message plus any structured fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        let mut out = self.message.unwrap_or_default();
        for field in self.fields {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&field);
        }
        out
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.fields.push(format!("{}={value:?}", field.name()));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push(format!("{}={value}", field.name()));
        }
    }
}

/// Install the global subscriber: reloadable level filter, stderr output and
/// the host sink layer.
///
/// Returns `false` when a global subscriber was already installed; the level
/// is still applied to the sink manager and, if present, the reload handle.
pub fn init_logging(level: LogLevel) -> bool {
    use tracing_subscriber::prelude::*;

    LogSinkManager::global().set_level(level);

    let (filter, handle) = tracing_subscriber::reload::Layer::new(level_filter(level));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(HostLogLayer::new());

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        // Keep whatever handle the first installation registered.
        let _ = ReloadHandle::global().reload_level(level);
        return false;
    }
    ReloadHandle::global().set_handle(handle);
    true
}
