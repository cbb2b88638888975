//! Protocol family descriptors
//!
//! A family bundles everything the pipeline needs to know about one
//! communication technology: its property schema, which transfer kinds it
//! carries, whether connections are resolved to peer identities, and which
//! code template the design-level generator emits.

use crate::endpoint::props;
use crate::{ComDefinition, ComInterface, Component, GeneratorError, GeneratorResult, TransferType, Vlnv};

/// Shape of the code emitted for a family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodegenTemplate {
    /// Endpoint identities plus the connect/open/close handshake
    Handshake,
    /// A static `{name, maxTransferSize}` table per connection
    StaticTable,
}

/// Descriptor for one communication protocol family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolFamily {
    /// Short name used on the command line
    pub name: String,

    /// Required/optional property schema
    pub definition: ComDefinition,

    /// Transfer kinds interfaces of this family may use
    pub transfer_kinds: Vec<TransferType>,

    /// Whether connections are resolved to the peer instance and interface
    pub peer_resolution: bool,

    pub template: CodegenTemplate,

    /// File set receiving component-level output
    pub file_set_name: String,

    /// File name of the per-instance header written by design-level runs
    pub instance_header: String,
}

impl ProtocolFamily {
    pub const MCAPI: &'static str = "mcapi";
    pub const LITE: &'static str = "lite";

    /// Multicore communication API: channel handshake with peer resolution
    pub fn mcapi() -> Self {
        let definition = ComDefinition::new(Vlnv::new("comgen", "protocols", "MCAPI", "1.0"))
            .with_property(props::PORT_ID, true)
            .with_property(props::HANDLE_NAME, true)
            .with_property(props::REMOTE_ENDPOINT_NAME, true)
            .with_property(props::SCALAR_SIZE, false);

        Self {
            name: Self::MCAPI.to_string(),
            definition,
            transfer_kinds: vec![
                TransferType::Message,
                TransferType::Scalar,
                TransferType::Packet,
            ],
            peer_resolution: true,
            template: CodegenTemplate::Handshake,
            file_set_name: "generated_mcapi".to_string(),
            instance_header: "mcapi_instance.h".to_string(),
        }
    }

    /// Lightweight buffer protocol: one static record per connection
    pub fn lite() -> Self {
        let definition = ComDefinition::new(Vlnv::new("comgen", "protocols", "LITE", "1.0"))
            .with_property(props::MAX_TRANSFER_SIZE, true);

        Self {
            name: Self::LITE.to_string(),
            definition,
            transfer_kinds: vec![TransferType::Packet, TransferType::Message],
            peer_resolution: false,
            template: CodegenTemplate::StaticTable,
            file_set_name: "generated_lite".to_string(),
            instance_header: "lite_instance.h".to_string(),
        }
    }

    /// All built-in families
    pub fn builtin() -> Vec<Self> {
        vec![Self::mcapi(), Self::lite()]
    }

    /// Look up a built-in family by its short name
    pub fn by_name(name: &str) -> GeneratorResult<Self> {
        Self::builtin()
            .into_iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| GeneratorError::UnknownFamily(name.to_string()))
    }

    /// Replace the built-in schema with one supplied by the metadata store
    #[must_use]
    pub fn with_definition(mut self, definition: ComDefinition) -> Self {
        self.definition = definition;
        self
    }

    /// An interface belongs to the family when its communication type names
    /// the family's definition; vendor, library and version are not compared.
    pub fn qualifies(&self, interface: &ComInterface) -> bool {
        interface
            .com_type
            .name
            .eq_ignore_ascii_case(&self.definition.vlnv.name)
    }

    pub fn qualifying_interfaces<'a>(
        &'a self,
        component: &'a Component,
    ) -> impl Iterator<Item = &'a ComInterface> + 'a {
        component
            .com_interfaces
            .iter()
            .filter(move |i| self.qualifies(i))
    }

    /// `true` if the component has at least one interface of this family
    pub fn applies_to(&self, component: &Component) -> bool {
        self.qualifying_interfaces(component).next().is_some()
    }

    pub fn supports(&self, transfer_type: TransferType) -> bool {
        self.transfer_kinds.contains(&transfer_type)
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::Direction;
    use test_case::test_case;

    #[test_case("mcapi", CodegenTemplate::Handshake)]
    #[test_case("MCAPI", CodegenTemplate::Handshake)]
    #[test_case("lite", CodegenTemplate::StaticTable)]
    fn ProtocolFamily___by_name___finds_builtin(name: &str, template: CodegenTemplate) {
        let family = ProtocolFamily::by_name(name).unwrap();

        assert_eq!(family.template, template);
    }

    #[test]
    fn ProtocolFamily___by_name___unknown_returns_error() {
        let result = ProtocolFamily::by_name("can-bus");

        assert!(matches!(result, Err(GeneratorError::UnknownFamily(_))));
    }

    #[test]
    fn ProtocolFamily___mcapi___requires_port_id() {
        let family = ProtocolFamily::mcapi();

        let required: Vec<&str> = family
            .definition
            .required_properties()
            .map(|p| p.name.as_str())
            .collect();

        assert!(required.contains(&"port_id"));
        assert!(!required.contains(&"scalar_size"));
    }

    #[test]
    fn ProtocolFamily___qualifies___matches_definition_name_only() {
        let family = ProtocolFamily::mcapi();
        let same_name = ComInterface::new(
            "a",
            Vlnv::new("other.vendor", "lib", "mcapi", "2.0"),
            TransferType::Packet,
            Direction::Out,
        );
        let other = ComInterface::new(
            "b",
            Vlnv::new("comgen", "protocols", "LITE", "1.0"),
            TransferType::Packet,
            Direction::Out,
        );

        assert!(family.qualifies(&same_name));
        assert!(!family.qualifies(&other));
    }

    #[test]
    fn ProtocolFamily___applies_to___false_without_interfaces() {
        let component = Component::new(Vlnv::new("v", "l", "empty", "1"));

        assert!(!ProtocolFamily::mcapi().applies_to(&component));
    }

    #[test]
    fn ProtocolFamily___lite___has_no_peer_resolution() {
        let family = ProtocolFamily::lite();

        assert!(!family.peer_resolution);
        assert!(!family.supports(TransferType::Scalar));
    }
}
