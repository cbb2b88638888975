//! File-set bookkeeping for generated files
//!
//! Registration is idempotent: a path already in the set is left alone, and
//! an instance's file-set reference is assigned once and reused afterwards.

use crate::FileWriter;
use comgen_core::{
    Component, Diagnostic, DiagnosticKind, FileBuilder, FileEntry, FileSet, GeneratorConfig,
    SoftwareInstance,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File type tag of every generated file
pub const C_SOURCE: &str = "cSource";

/// Builder command added when a file set has none for C sources
pub const DEFAULT_C_BUILDER: &str = "gcc -c -o";

/// Group the generated file sets belong to
pub const SOURCE_GROUP: &str = "sourceFiles";

/// Registers files into one file set of a component
pub struct FileSetRegistrar<'a> {
    component: &'a mut Component,
    file_set: String,
}

impl<'a> FileSetRegistrar<'a> {
    /// Open `file_set` on `component`, creating it if needed
    pub fn new(component: &'a mut Component, file_set: &str) -> Self {
        let set = component.file_set_or_insert(file_set);
        if !set.groups.iter().any(|g| g == SOURCE_GROUP) {
            set.groups.push(SOURCE_GROUP.to_string());
        }
        Self {
            component,
            file_set: file_set.to_string(),
        }
    }

    fn set_mut(&mut self) -> &mut FileSet {
        self.component.file_set_or_insert(&self.file_set)
    }

    /// Add `entry` unless its path is already listed.
    ///
    /// Returns `true` if the path was already present.
    pub fn register_file(&mut self, entry: FileEntry) -> bool {
        let path = entry.path.clone();
        let already_present = self.set_mut().add_file(entry);
        debug!(file_set = %self.file_set, path = %path, already_present, "Registered file");
        already_present
    }

    /// Add the default C builder unless one exists; `true` if it was added
    pub fn ensure_c_builder(&mut self) -> bool {
        let set = self.set_mut();
        if set.has_builder_for(C_SOURCE) {
            return false;
        }
        set.default_builders.push(FileBuilder {
            file_type: C_SOURCE.to_string(),
            command: DEFAULT_C_BUILDER.to_string(),
            replace_default_flags: true,
        });
        true
    }

    pub fn file_set_name(&self) -> &str {
        &self.file_set
    }

    pub fn file_set(&self) -> Option<&FileSet> {
        self.component.file_set(&self.file_set)
    }

    /// Reference the file set from the component's software view.
    ///
    /// A single view is used as is; with several, `config.sw_view` picks one.
    /// Returns a warning when no view could be chosen.
    pub fn attach_to_sw_view(&mut self, config: &GeneratorConfig) -> Option<Diagnostic> {
        let name = self.file_set.clone();
        let vlnv = self.component.vlnv.clone();
        let views = &mut self.component.sw_views;

        match views.len() {
            0 => None,
            1 => {
                views[0].add_file_set_ref(&name);
                None
            }
            _ => {
                let Some(wanted) = config.sw_view.as_deref() else {
                    return Some(Diagnostic::warning(
                        DiagnosticKind::Metadata,
                        format!(
                            "component {vlnv} has several software views; set sw_view to choose one for file set '{name}'"
                        ),
                    ));
                };
                match views.iter_mut().find(|v| v.name == wanted) {
                    Some(view) => {
                        view.add_file_set_ref(&name);
                        None
                    }
                    None => Some(Diagnostic::warning(
                        DiagnosticKind::Metadata,
                        format!("component {vlnv} has no software view '{wanted}'"),
                    )),
                }
            }
        }
    }
}

/// File-set name holding an instance's generated headers
pub fn instance_file_set_name(system_view: &str, instance: &str) -> String {
    format!("{system_view}_{instance}_headers")
}

/// The instance's file-set reference, assigned on first use
pub fn file_set_ref(instance: &mut SoftwareInstance, system_view: &str) -> String {
    let name = &instance.name;
    instance
        .file_set_ref
        .get_or_insert_with(|| instance_file_set_name(system_view, name))
        .clone()
}

/// Register `entry` for `instance`, in the file set its reference names on `owner`
pub fn register_instance_file(
    owner: &mut Component,
    instance: &mut SoftwareInstance,
    system_view: &str,
    entry: FileEntry,
) -> bool {
    let file_set = file_set_ref(instance, system_view);
    FileSetRegistrar::new(owner, &file_set).register_file(entry)
}

/// Targets that already exist and would be overwritten
pub fn files_about_to_be_replaced<W>(writer: &W, paths: &[PathBuf]) -> Vec<PathBuf>
where
    W: FileWriter + ?Sized,
{
    paths
        .iter()
        .filter(|p| writer.exists(p))
        .cloned()
        .collect()
}

/// File-set path for a generated file: forward slashes, relative to the output root
pub fn file_set_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[path = "registrar/registrar_tests.rs"]
mod registrar_tests;
