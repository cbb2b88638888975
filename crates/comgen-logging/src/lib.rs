//! comgen-logging - Tracing subscriber setup and host log-sink bridge
//!
//! This crate provides:
//! - [`init_logging`] installing a stderr subscriber with a reloadable level
//! - [`HostLogLayer`] forwarding events to a host-registered [`LogSink`]
//! - [`ReloadHandle`] for changing the level at runtime

mod layer;
mod reload;
mod sink;

pub use comgen_core::LogLevel;
pub use layer::{HostLogLayer, init_logging};
pub use reload::ReloadHandle;
pub use sink::{LogRecord, LogSink, LogSinkManager};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{HostLogLayer, LogLevel, LogRecord, LogSinkManager, init_logging};
}
