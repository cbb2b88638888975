//! Host log-sink management

use comgen_core::LogLevel;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// One forwarded log event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    /// Module path the event came from
    pub target: String,
    pub message: String,
}

/// Receiver for forwarded log events
pub type LogSink = Arc<dyn Fn(&LogRecord) + Send + Sync>;

static SINK_MANAGER: OnceCell<LogSinkManager> = OnceCell::new();

/// Holds the host-registered sink and its level threshold
pub struct LogSinkManager {
    sink: RwLock<Option<LogSink>>,
    level: AtomicU8,
}

impl LogSinkManager {
    pub fn new() -> Self {
        Self {
            sink: RwLock::new(None),
            level: AtomicU8::new(LogLevel::Info as u8),
        }
    }

    /// Get the global sink manager instance
    pub fn global() -> &'static LogSinkManager {
        SINK_MANAGER.get_or_init(LogSinkManager::new)
    }

    pub fn set_sink(&self, sink: Option<LogSink>) {
        *self.sink.write() = sink;
    }

    pub fn has_sink(&self) -> bool {
        self.sink.read().is_some()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::SeqCst))
    }

    /// `Off` disables everything, including `Error`
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self.level()
    }

    /// Forward to the sink if one is set and the level is enabled
    pub fn log(&self, level: LogLevel, target: &str, message: &str) {
        if !self.is_enabled(level) {
            return;
        }

        // Clone out so the sink runs without the lock held.
        let Some(sink) = self.sink.read().clone() else {
            return;
        };
        sink(&LogRecord {
            level,
            target: target.to_string(),
            message: message.to_string(),
        });
    }
}

impl Default for LogSinkManager {
    fn default() -> Self {
        Self::new()
    }
}
