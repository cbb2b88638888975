//! Design graph model
//!
//! Plain data describing components, their communication interfaces, the
//! software instances placed in a design and the connections between them.
//! The generators only ever read these types, with the single exception of
//! file-set bookkeeping (see [`FileSet`] and [`SoftwareInstance::file_set_ref`]).

use crate::GeneratorError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Vendor/library/name/version identity of a library object.
///
/// Rendered and parsed as `vendor:library:name:version`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Vlnv {
    pub vendor: String,
    pub library: String,
    pub name: String,
    pub version: String,
}

impl Vlnv {
    pub fn new(
        vendor: impl Into<String>,
        library: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            vendor: vendor.into(),
            library: library.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

impl FromStr for Vlnv {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        match parts.as_slice() {
            [vendor, library, name, version] if parts.iter().all(|p| !p.is_empty()) => {
                Ok(Vlnv::new(*vendor, *library, *name, *version))
            }
            _ => Err(GeneratorError::InvalidVlnv(s.to_string())),
        }
    }
}

impl TryFrom<String> for Vlnv {
    type Error = GeneratorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Vlnv> for String {
    fn from(vlnv: Vlnv) -> Self {
        vlnv.to_string()
    }
}

impl fmt::Display for Vlnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.vendor, self.library, self.name, self.version
        )
    }
}

/// How data moves over a communication interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferType {
    Message,
    Scalar,
    Packet,
}

impl TransferType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferType::Message => "message",
            TransferType::Scalar => "scalar",
            TransferType::Packet => "packet",
        }
    }

    /// Scalar and packet transfers run over connected channels; messages don't.
    pub fn is_channel(&self) -> bool {
        matches!(self, TransferType::Scalar | TransferType::Packet)
    }

    /// Short prefix used in channel API names (`mcapi_<prefix>chan_...`)
    pub fn channel_prefix(&self) -> Option<&'static str> {
        match self {
            TransferType::Packet => Some("pkt"),
            TransferType::Scalar => Some("scl"),
            TransferType::Message => None,
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data direction of an interface as seen from its owning component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
    #[serde(alias = "in_out")]
    InOut,
}

impl Direction {
    /// Only `out` interfaces drive a channel; `in` and `inout` act as receivers.
    pub fn is_sender(&self) -> bool {
        matches!(self, Direction::Out)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::In => write!(f, "in"),
            Direction::Out => write!(f, "out"),
            Direction::InOut => write!(f, "inout"),
        }
    }
}

/// One property declared by a communication definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComProperty {
    pub name: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ComProperty {
    pub fn new(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
            description: None,
        }
    }
}

/// A protocol family's property contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComDefinition {
    pub vlnv: Vlnv,

    #[serde(default)]
    pub properties: Vec<ComProperty>,
}

impl ComDefinition {
    pub fn new(vlnv: Vlnv) -> Self {
        Self {
            vlnv,
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, required: bool) -> Self {
        self.properties.push(ComProperty::new(name, required));
        self
    }

    pub fn required_properties(&self) -> impl Iterator<Item = &ComProperty> {
        self.properties.iter().filter(|p| p.required)
    }
}

/// A communication interface declared on a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComInterface {
    pub name: String,

    /// The communication definition (protocol family) this interface implements
    pub com_type: Vlnv,

    pub transfer_type: TransferType,

    pub direction: Direction,

    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl ComInterface {
    pub fn new(
        name: impl Into<String>,
        com_type: Vlnv,
        transfer_type: TransferType,
        direction: Direction,
    ) -> Self {
        Self {
            name: name.into(),
            com_type,
            transfer_type,
            direction,
            properties: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Property value, treating blank values as absent
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// A file tracked in a file set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,

    #[serde(default)]
    pub file_types: Vec<String>,

    #[serde(default)]
    pub include_file: bool,
}

impl FileEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            file_types: Vec::new(),
            include_file: false,
        }
    }

    #[must_use]
    pub fn with_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_types.push(file_type.into());
        self
    }

    #[must_use]
    pub fn as_include(mut self) -> Self {
        self.include_file = true;
        self
    }
}

/// Default build command for a file type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileBuilder {
    pub file_type: String,
    pub command: String,

    #[serde(default)]
    pub replace_default_flags: bool,
}

/// Named, ordered, duplicate-free list of files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSet {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,

    #[serde(default)]
    pub files: Vec<FileEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_builders: Vec<FileBuilder>,
}

impl FileSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.iter().any(|f| f.path == path)
    }

    /// Append a file unless its path is already listed.
    ///
    /// Returns `true` if the path was already present.
    pub fn add_file(&mut self, entry: FileEntry) -> bool {
        if self.contains(&entry.path) {
            return true;
        }
        self.files.push(entry);
        false
    }

    pub fn has_builder_for(&self, file_type: &str) -> bool {
        self.default_builders.iter().any(|b| b.file_type == file_type)
    }
}

/// Software view of a component; references the file sets that build it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwView {
    pub name: String,

    #[serde(default)]
    pub file_set_refs: Vec<String>,
}

impl SwView {
    pub fn add_file_set_ref(&mut self, name: &str) {
        if !self.file_set_refs.iter().any(|r| r == name) {
            self.file_set_refs.push(name.to_string());
        }
    }
}

/// System view of a component; references the design it is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemView {
    pub name: String,
    pub design: Vlnv,
}

/// A library component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub vlnv: Vlnv,

    #[serde(default)]
    pub com_interfaces: Vec<ComInterface>,

    #[serde(default)]
    pub file_sets: Vec<FileSet>,

    #[serde(default)]
    pub sw_views: Vec<SwView>,

    #[serde(default)]
    pub system_views: Vec<SystemView>,
}

impl Component {
    pub fn new(vlnv: Vlnv) -> Self {
        Self {
            vlnv,
            com_interfaces: Vec::new(),
            file_sets: Vec::new(),
            sw_views: Vec::new(),
            system_views: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_interface(mut self, interface: ComInterface) -> Self {
        self.com_interfaces.push(interface);
        self
    }

    pub fn interface(&self, name: &str) -> Option<&ComInterface> {
        self.com_interfaces.iter().find(|i| i.name == name)
    }

    pub fn file_set(&self, name: &str) -> Option<&FileSet> {
        self.file_sets.iter().find(|fs| fs.name == name)
    }

    /// Get a file set by name, creating an empty one if it doesn't exist
    pub fn file_set_or_insert(&mut self, name: &str) -> &mut FileSet {
        let index = match self.file_sets.iter().position(|fs| fs.name == name) {
            Some(index) => index,
            None => {
                self.file_sets.push(FileSet::new(name));
                self.file_sets.len() - 1
            }
        };
        &mut self.file_sets[index]
    }

    /// The system view whose design is `design`, if any
    pub fn system_view_for(&self, design: &Vlnv) -> Option<&SystemView> {
        self.system_views.iter().find(|v| &v.design == design)
    }
}

/// A component placed in a design
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareInstance {
    /// Unique within the owning design
    pub name: String,

    pub component: Vlnv,

    #[serde(default)]
    pub properties: BTreeMap<String, String>,

    /// File set holding this instance's generated files; assigned once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_set_ref: Option<String>,
}

impl SoftwareInstance {
    pub fn new(name: impl Into<String>, component: Vlnv) -> Self {
        Self {
            name: name.into(),
            component,
            properties: BTreeMap::new(),
            file_set_ref: None,
        }
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Property value, treating blank values as absent
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// One end of a connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionEndpoint {
    pub instance: String,
    pub interface: String,
}

impl ConnectionEndpoint {
    pub fn new(instance: impl Into<String>, interface: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
            interface: interface.into(),
        }
    }
}

impl fmt::Display for ConnectionEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.instance, self.interface)
    }
}

/// Undirected point-to-point connection between two interfaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComConnection {
    pub name: String,
    pub endpoints: [ConnectionEndpoint; 2],
}

impl ComConnection {
    pub fn new(name: impl Into<String>, a: ConnectionEndpoint, b: ConnectionEndpoint) -> Self {
        Self {
            name: name.into(),
            endpoints: [a, b],
        }
    }

    /// Split into `(ours, theirs)` when one end belongs to `instance`.
    ///
    /// The first matching end wins, so a self-connection resolves once.
    pub fn split_for(&self, instance: &str) -> Option<(&ConnectionEndpoint, &ConnectionEndpoint)> {
        let [a, b] = &self.endpoints;
        if a.instance == instance {
            Some((a, b))
        } else if b.instance == instance {
            Some((b, a))
        } else {
            None
        }
    }
}

/// A system-level design: instances plus the connections between them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Design {
    pub vlnv: Vlnv,

    #[serde(default)]
    pub instances: Vec<SoftwareInstance>,

    #[serde(default)]
    pub connections: Vec<ComConnection>,
}

impl Design {
    pub fn new(vlnv: Vlnv) -> Self {
        Self {
            vlnv,
            instances: Vec::new(),
            connections: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_instance(mut self, instance: SoftwareInstance) -> Self {
        self.instances.push(instance);
        self
    }

    #[must_use]
    pub fn with_connection(mut self, connection: ComConnection) -> Self {
        self.connections.push(connection);
        self
    }

    pub fn instance(&self, name: &str) -> Option<&SoftwareInstance> {
        self.instances.iter().find(|i| i.name == name)
    }

    pub fn instance_mut(&mut self, name: &str) -> Option<&mut SoftwareInstance> {
        self.instances.iter_mut().find(|i| i.name == name)
    }
}
