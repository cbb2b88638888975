//! Per-run endpoint descriptions derived from interfaces and instances

use crate::{ComInterface, Direction, SoftwareInstance, TransferType, Vlnv};
use std::path::PathBuf;

/// Well-known property names
pub mod props {
    pub const PORT_ID: &str = "port_id";
    pub const HANDLE_NAME: &str = "handle_name";
    pub const REMOTE_ENDPOINT_NAME: &str = "remote_endpoint_name";
    pub const SCALAR_SIZE: &str = "scalar_size";
    pub const MAX_TRANSFER_SIZE: &str = "max_transfer_size";
    pub const NODE_ID: &str = "node_id";
    pub const DOMAIN_ID: &str = "domain_id";
}

/// Value emitted for identifiers an instance doesn't define
pub const UNSET_ID: &str = "0";

/// One interface's resolved description, rebuilt on every run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointData {
    /// Interface name, used as the local endpoint variable
    pub name: String,
    /// Variable holding the remote endpoint this one is wired to
    pub remote_name: String,
    pub port_id: String,
    pub node_id: String,
    pub domain_id: String,
    /// Channel handle variable
    pub handle_name: String,
    pub scalar_size: Option<String>,
    pub max_transfer_size: Option<String>,
    pub transfer_type: TransferType,
    pub direction: Direction,
}

impl EndpointData {
    /// Describe an interface on its own, without any instance context
    pub fn from_interface(interface: &ComInterface) -> Self {
        let name = c_identifier(&interface.name);
        let remote_name = interface
            .property(props::REMOTE_ENDPOINT_NAME)
            .map(c_identifier)
            .unwrap_or_else(|| format!("{name}_remote"));
        let handle_name = interface
            .property(props::HANDLE_NAME)
            .map(c_identifier)
            .unwrap_or_else(|| format!("{name}_handle"));

        Self {
            port_id: interface
                .property(props::PORT_ID)
                .unwrap_or(UNSET_ID)
                .to_string(),
            node_id: UNSET_ID.to_string(),
            domain_id: UNSET_ID.to_string(),
            scalar_size: interface.property(props::SCALAR_SIZE).map(str::to_string),
            max_transfer_size: interface
                .property(props::MAX_TRANSFER_SIZE)
                .map(str::to_string),
            transfer_type: interface.transfer_type,
            direction: interface.direction,
            name,
            remote_name,
            handle_name,
        }
    }

    /// Describe an interface as placed in a design by `instance`
    pub fn for_instance(interface: &ComInterface, instance: &SoftwareInstance) -> Self {
        let mut data = Self::from_interface(interface);
        if let Some(node) = instance.property(props::NODE_ID) {
            data.node_id = node.to_string();
        }
        if let Some(domain) = instance.property(props::DOMAIN_ID) {
            data.domain_id = domain.to_string();
        }
        data
    }

    /// Upper-case prefix of the local `<NAME>_PORT` constant
    pub fn local_macro(&self) -> String {
        self.name.to_ascii_uppercase()
    }

    /// Upper-case prefix of the `<REMOTE>_DOMAIN/_NODE/_PORT` identity macros
    pub fn remote_macro(&self) -> String {
        self.remote_name.to_ascii_uppercase()
    }

    /// Scalar and packet endpoints take part in the channel handshake
    pub fn is_channel(&self) -> bool {
        self.transfer_type.is_channel()
    }
}

/// What a local endpoint is wired to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerRef {
    /// Resolved peer endpoint with its identity triple
    Endpoint(EndpointData),
    /// Families without peer resolution only know the connection
    Connection(String),
}

/// Per-instance aggregate built at the start of a design-level run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub instance: String,
    pub component: Vlnv,
    pub node_id: String,
    pub domain_id: String,
    /// Output directory relative to the run's root
    pub output_dir: PathBuf,
    pub links: Vec<(EndpointData, PeerRef)>,
}

impl NodeData {
    pub fn new(instance: &SoftwareInstance) -> Self {
        Self {
            instance: instance.name.clone(),
            component: instance.component.clone(),
            node_id: instance
                .property(props::NODE_ID)
                .unwrap_or(UNSET_ID)
                .to_string(),
            domain_id: instance
                .property(props::DOMAIN_ID)
                .unwrap_or(UNSET_ID)
                .to_string(),
            output_dir: PathBuf::from(c_identifier(&instance.name)),
            links: Vec::new(),
        }
    }

    pub fn push_link(&mut self, ours: EndpointData, peer: PeerRef) {
        self.links.push((ours, peer));
    }

    /// Peer endpoints in link order
    pub fn peer_endpoints(&self) -> impl Iterator<Item = &EndpointData> {
        self.links.iter().filter_map(|(_, peer)| match peer {
            PeerRef::Endpoint(data) => Some(data),
            PeerRef::Connection(_) => None,
        })
    }
}

/// Make `name` usable as a C identifier
pub fn c_identifier(name: &str) -> String {
    let mut ident: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

#[cfg(test)]
#[path = "endpoint/endpoint_tests.rs"]
mod endpoint_tests;
