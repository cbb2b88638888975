//! # comgen
//!
//! Resolves the communication endpoints of a multicore software design and
//! generates the C code that wires them together over an MCAPI-style API.
//!
//! comgen reads a metadata library of components, designs and protocol
//! definitions, and provides:
//! - Property-schema validation in strict and collecting modes
//! - Endpoint resolution across a design's connections
//! - Transfer-type and scalar-size compatibility checks
//! - Per-component handshake sources (`mcapicode.h`, `mcapicode.c`, `main.c`)
//! - Per-instance headers for whole designs, for the handshake family and the
//!   lightweight static-table family
//! - File-set registration of everything generated
//!
//! ## Quick Start
//!
//! ```ignore
//! use comgen::prelude::*;
//!
//! let mut library = Library::load("library.toml")?;
//! let family = ProtocolFamily::mcapi();
//! let config = GeneratorConfig::default();
//! let request = SystemRequest {
//!     design: "acme:sys:demo:1.0".parse()?,
//!     top: "acme:hw:board:1.0".parse()?,
//!     output_dir: "generated".into(),
//! };
//!
//! let result = SystemGenerator::new(&family, &config).generate(
//!     &mut library,
//!     &request,
//!     &mut FsWriter,
//!     &mut AlwaysConfirm,
//! );
//! for diagnostic in &result.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! if library.is_dirty() {
//!     library.save("library.toml")?;
//! }
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`comgen_core`] - Design model, validation, resolution and the handshake model
//! - [`comgen_codegen`] - C source writers and the two generators
//! - [`comgen_logging`] - Subscriber setup and the host log sink

// Re-export core types
pub use comgen_core::{
    ChannelState, CodegenTemplate, ComConnection, ComDefinition, ComInterface, Component,
    ConnectionEndpoint, Design, Diagnostic, DiagnosticKind, Direction, EndpointData,
    GeneratorConfig, GeneratorError, GeneratorResult, HandshakeMachine, HandshakePhase, Library,
    LogLevel, MetadataStore, NodeData, PeerRef, ProtocolFamily, Severity, SoftwareInstance,
    TransferType, ValidationMode, Validator, Vlnv, compat, resolve,
};

// Re-export generators and output seams
pub use comgen_codegen::{
    AlwaysConfirm, ComponentGenerator, ConfirmOverwrite, ConfirmWith, FileWriter, FsWriter,
    GenerationResult, MemoryWriter, NeverConfirm, SystemGenerator, SystemRequest,
};

// Re-export logging setup
pub use comgen_logging::{LogSinkManager, ReloadHandle, init_logging};

// Re-export common dependencies that hosts need
pub use serde;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use comgen::prelude::*;` to import commonly used types.
///
/// This includes:
/// - Model: `Library`, `Component`, `Design`, `Vlnv`
/// - Generation: `ComponentGenerator`, `SystemGenerator`, `SystemRequest`, `GenerationResult`
/// - Output: `FsWriter`, `MemoryWriter`, `AlwaysConfirm`, `NeverConfirm`
/// - Setup: `GeneratorConfig`, `ProtocolFamily`, `LogLevel`, `init_logging`
pub mod prelude {
    pub use crate::{
        AlwaysConfirm, Component, ComponentGenerator, ConfirmOverwrite, Design, Diagnostic,
        FileWriter, FsWriter, GenerationResult, GeneratorConfig, Library, LogLevel, MemoryWriter,
        MetadataStore, NeverConfirm, ProtocolFamily, SystemGenerator, SystemRequest, Vlnv,
        init_logging,
    };
}
