//! Required-property validation
//!
//! The same rule set is used in two modes:
//! - [`ValidationMode::Strict`] gates component-level generation; every
//!   finding is fatal, but the whole component is still scanned so the
//!   caller gets the full batch at once.
//! - [`ValidationMode::Collect`] runs inside the compatibility checker;
//!   findings are warnings and never stop a run.

use crate::{
    ComDefinition, ComInterface, Component, Diagnostic, DiagnosticKind, ProtocolFamily, Severity,
};

/// How findings are classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Strict,
    Collect,
}

impl ValidationMode {
    pub fn severity(&self) -> Severity {
        match self {
            ValidationMode::Strict => Severity::Error,
            ValidationMode::Collect => Severity::Warning,
        }
    }
}

/// Checks interfaces against their family's required properties
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    mode: ValidationMode,
}

impl Validator {
    pub fn new(mode: ValidationMode) -> Self {
        Self { mode }
    }

    pub fn strict() -> Self {
        Self::new(ValidationMode::Strict)
    }

    pub fn collect() -> Self {
        Self::new(ValidationMode::Collect)
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// One diagnostic per required property that `interface` lacks a
    /// non-empty value for. `owner` names the component or instance.
    pub fn validate(
        &self,
        definition: &ComDefinition,
        interface: &ComInterface,
        owner: &str,
    ) -> Vec<Diagnostic> {
        definition
            .required_properties()
            .filter(|p| interface.property(&p.name).is_none())
            .map(|p| Diagnostic {
                severity: self.mode.severity(),
                kind: DiagnosticKind::MissingProperty,
                message: format!(
                    "required property '{}' of {} is missing on interface '{}' of {}",
                    p.name, definition.vlnv.name, interface.name, owner
                ),
            })
            .collect()
    }

    /// Validate every interface of `component` that belongs to `family`
    pub fn validate_component(
        &self,
        family: &ProtocolFamily,
        component: &Component,
    ) -> Vec<Diagnostic> {
        let owner = format!("component {}", component.vlnv);
        family
            .qualifying_interfaces(component)
            .flat_map(|iface| self.validate(&family.definition, iface, &owner))
            .collect()
    }
}

/// Strict check of a single interface
pub fn validate(
    definition: &ComDefinition,
    interface: &ComInterface,
    owner: &str,
) -> Vec<Diagnostic> {
    Validator::strict().validate(definition, interface, owner)
}
