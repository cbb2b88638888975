//! Metadata store boundary and the TOML-backed library
//!
//! The generators borrow components and designs from a [`MetadataStore`] for
//! the duration of a run and hand back file-set changes at the end through
//! the `write_*_metadata` methods. They never own or delete library objects.

use crate::{ComDefinition, Component, Design, GeneratorError, GeneratorResult, Vlnv};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Source of component, design and communication-definition metadata
pub trait MetadataStore {
    fn component(&self, vlnv: &Vlnv) -> Option<&Component>;

    fn design(&self, vlnv: &Vlnv) -> Option<&Design>;

    fn com_definition(&self, vlnv: &Vlnv) -> Option<&ComDefinition>;

    /// Persist a component whose file sets or views were updated
    fn write_component_metadata(&mut self, component: &Component) -> GeneratorResult<()>;

    /// Persist a design whose instance file-set references were updated
    fn write_design_metadata(&mut self, design: &Design) -> GeneratorResult<()>;
}

/// In-memory library loaded from a TOML document
///
/// ```toml
/// [[com_definitions]]
/// vlnv = "comgen:protocols:MCAPI:1.0"
/// properties = [{ name = "port_id", required = true }]
///
/// [[components]]
/// vlnv = "acme:sw:producer:1.0"
///
/// [[designs]]
/// vlnv = "acme:sys:demo:1.0"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub com_definitions: Vec<ComDefinition>,

    #[serde(default)]
    pub components: Vec<Component>,

    #[serde(default)]
    pub designs: Vec<Design>,

    #[serde(skip)]
    dirty: bool,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a library from a TOML file
    pub fn load(path: impl AsRef<Path>) -> GeneratorResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parse a library from TOML text
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> GeneratorResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> GeneratorResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the library back to a TOML file and clear the dirty flag
    pub fn save(&mut self, path: impl AsRef<Path>) -> GeneratorResult<()> {
        std::fs::write(path.as_ref(), self.to_toml_string()?)?;
        self.dirty = false;
        Ok(())
    }

    /// `true` once any metadata has been written back since load/save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }

    pub fn add_design(&mut self, design: Design) {
        self.designs.push(design);
    }

    pub fn add_com_definition(&mut self, definition: ComDefinition) {
        self.com_definitions.push(definition);
    }

    /// Like [`MetadataStore::component`], but a miss is an error
    pub fn require_component(&self, vlnv: &Vlnv) -> GeneratorResult<&Component> {
        self.component(vlnv)
            .ok_or_else(|| GeneratorError::UnknownComponent(vlnv.to_string()))
    }

    /// Like [`MetadataStore::design`], but a miss is an error
    pub fn require_design(&self, vlnv: &Vlnv) -> GeneratorResult<&Design> {
        self.design(vlnv)
            .ok_or_else(|| GeneratorError::UnknownDesign(vlnv.to_string()))
    }

    /// Definition whose VLNV name matches `name`, ignoring case
    pub fn com_definition_named(&self, name: &str) -> Option<&ComDefinition> {
        self.com_definitions
            .iter()
            .find(|d| d.vlnv.name.eq_ignore_ascii_case(name))
    }
}

impl MetadataStore for Library {
    fn component(&self, vlnv: &Vlnv) -> Option<&Component> {
        self.components.iter().find(|c| &c.vlnv == vlnv)
    }

    fn design(&self, vlnv: &Vlnv) -> Option<&Design> {
        self.designs.iter().find(|d| &d.vlnv == vlnv)
    }

    fn com_definition(&self, vlnv: &Vlnv) -> Option<&ComDefinition> {
        self.com_definitions.iter().find(|d| &d.vlnv == vlnv)
    }

    fn write_component_metadata(&mut self, component: &Component) -> GeneratorResult<()> {
        let slot = self
            .components
            .iter_mut()
            .find(|c| c.vlnv == component.vlnv)
            .ok_or_else(|| GeneratorError::StoreWrite(format!("no component {}", component.vlnv)))?;
        *slot = component.clone();
        self.dirty = true;
        Ok(())
    }

    fn write_design_metadata(&mut self, design: &Design) -> GeneratorResult<()> {
        let slot = self
            .designs
            .iter_mut()
            .find(|d| d.vlnv == design.vlnv)
            .ok_or_else(|| GeneratorError::StoreWrite(format!("no design {}", design.vlnv)))?;
        *slot = design.clone();
        self.dirty = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "store/store_tests.rs"]
mod store_tests;
