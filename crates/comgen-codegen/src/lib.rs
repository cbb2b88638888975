//! comgen-codegen - C source generation for MCAPI-style endpoint handshakes
//!
//! This crate provides:
//! - [`ComponentGenerator`] emitting the handshake header, source and main template
//! - [`SystemGenerator`] emitting one header per design instance
//! - [`FileWriter`] and [`ConfirmOverwrite`] seams for output and overwrite prompts
//! - [`FileSetRegistrar`] recording generated files in component metadata

mod component;
mod output;
pub mod registrar;
mod result;
mod system;
pub mod writer;

pub use component::{ComponentGenerator, HEADER_FILE, MAIN_FILE, SOURCE_FILE};
pub use output::{AlwaysConfirm, ConfirmOverwrite, ConfirmWith, FileWriter, FsWriter, MemoryWriter, NeverConfirm};
pub use registrar::FileSetRegistrar;
pub use result::GenerationResult;
pub use system::{SystemGenerator, SystemPlan, SystemRequest, instance_header_path};
pub use writer::CSourceWriter;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AlwaysConfirm, ComponentGenerator, ConfirmOverwrite, FileWriter, FsWriter,
        GenerationResult, SystemGenerator, SystemRequest,
    };
}
