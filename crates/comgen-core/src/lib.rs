//! comgen-core - Design graph model, endpoint resolution and validation
//!
//! This crate provides the pure, I/O-free half of comgen:
//! - [`Component`], [`Design`] and friends describing a system design
//! - [`ProtocolFamily`] descriptors for the supported communication protocols
//! - [`Validator`] for required-property checks in strict or collecting mode
//! - [`resolve`] and [`compat::check`] for wiring instances together
//! - [`HandshakeMachine`], an executable model of the generated handshake
//! - [`MetadataStore`] and the TOML-backed [`Library`]

pub mod compat;
mod config;
mod diagnostic;
mod endpoint;
mod error;
mod family;
pub mod handshake;
mod model;
pub mod resolve;
mod store;
pub mod validate;

pub use config::{GeneratorConfig, IndentStyle};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity, has_fatal};
pub use endpoint::{EndpointData, NodeData, PeerRef, UNSET_ID, c_identifier, props};
pub use error::{GeneratorError, GeneratorResult};
pub use family::{CodegenTemplate, ProtocolFamily};
pub use handshake::{
    ChannelOperation, ChannelState, HandshakeMachine, HandshakeOutcome, HandshakePhase,
    IssueStatus,
};
pub use model::{
    ComConnection, ComDefinition, ComInterface, ComProperty, Component, ConnectionEndpoint,
    Design, Direction, FileBuilder, FileEntry, FileSet, SoftwareInstance, SwView, SystemView,
    TransferType, Vlnv,
};
pub use resolve::{Resolution, ResolvedLink, resolve};
pub use store::{Library, MetadataStore};
pub use validate::{ValidationMode, Validator};

/// Log levels understood by the logging bridge and the configuration
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }

    /// Parse a level name as written in configuration files (case-insensitive)
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            "off" => Some(LogLevel::Off),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ComInterface, Component, Design, Diagnostic, GeneratorConfig, GeneratorError,
        GeneratorResult, Library, LogLevel, MetadataStore, ProtocolFamily, Severity,
        SoftwareInstance, ValidationMode, Validator, Vlnv,
    };
}

#[cfg(test)]
mod lib_tests;
