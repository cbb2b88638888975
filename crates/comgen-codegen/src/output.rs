//! Where generated text goes, and who approves overwriting it

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Sink for generated files
pub trait FileWriter {
    fn exists(&self, path: &Path) -> bool;

    /// Write `contents` to `path`, creating missing parent directories
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Writes to the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWriter;

impl FileWriter for FsWriter {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }
}

/// Keeps generated files in memory; used for previews and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    files: BTreeMap<PathBuf, String>,
    /// Paths whose writes fail with `PermissionDenied`
    read_only: Vec<PathBuf>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a file, as if an earlier run had written it
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// Make writes to `path` fail
    #[must_use]
    pub fn with_read_only(mut self, path: impl Into<PathBuf>) -> Self {
        self.read_only.push(path.into());
        self
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileWriter for MemoryWriter {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        if self.read_only.iter().any(|p| p == path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", path.display()),
            ));
        }
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

/// Asked once per run, before anything is written, when files would be replaced
pub trait ConfirmOverwrite {
    fn confirm_overwrite(&mut self, paths: &[PathBuf]) -> bool;
}

/// Always proceeds
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmOverwrite for AlwaysConfirm {
    fn confirm_overwrite(&mut self, _paths: &[PathBuf]) -> bool {
        true
    }
}

/// Never overwrites
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl ConfirmOverwrite for NeverConfirm {
    fn confirm_overwrite(&mut self, _paths: &[PathBuf]) -> bool {
        false
    }
}

/// Adapts a closure, e.g. an interactive prompt
pub struct ConfirmWith<F>(pub F);

impl<F> ConfirmOverwrite for ConfirmWith<F>
where
    F: FnMut(&[PathBuf]) -> bool,
{
    fn confirm_overwrite(&mut self, paths: &[PathBuf]) -> bool {
        (self.0)(paths)
    }
}
