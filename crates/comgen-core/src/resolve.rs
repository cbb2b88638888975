//! Endpoint resolution
//!
//! For one software instance, walk the design's connections and pair each
//! interface the instance owns with the peer instance and peer interface on
//! the other end. Ends that cannot be resolved are returned as gaps rather
//! than dropped; the caller decides whether to report them.

use crate::{
    ComConnection, ComInterface, Design, Diagnostic, DiagnosticKind, MetadataStore,
    SoftwareInstance,
};
use tracing::debug;

/// One resolved `(our interface, peer instance, peer interface)` triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLink<'a> {
    pub connection: &'a ComConnection,
    pub interface: &'a ComInterface,
    pub peer_instance: &'a SoftwareInstance,
    pub peer_interface: &'a ComInterface,
}

/// Links in connection declaration order, plus whatever couldn't be resolved
#[derive(Debug, Clone, Default)]
pub struct Resolution<'a> {
    pub links: Vec<ResolvedLink<'a>>,
    pub gaps: Vec<Diagnostic>,
}

impl Resolution<'_> {
    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }
}

/// Resolve every connection touching `instance`.
///
/// No de-duplication: an interface appears once per connection that names
/// it. A connection with `instance` on both ends resolves once, from its
/// first endpoint.
pub fn resolve<'a, S>(
    store: &'a S,
    design: &'a Design,
    instance: &'a SoftwareInstance,
) -> Resolution<'a>
where
    S: MetadataStore + ?Sized,
{
    let mut resolution = Resolution::default();
    let component = store.component(&instance.component);

    for connection in &design.connections {
        let Some((ours, theirs)) = connection.split_for(&instance.name) else {
            continue;
        };

        let gap = |reason: String| {
            Diagnostic::warning(
                DiagnosticKind::UnresolvedEndpoint,
                format!(
                    "connection '{}' between {} and {} in design {} is ignored: {}",
                    connection.name, ours, theirs, design.vlnv, reason
                ),
            )
        };

        let Some(component) = component else {
            resolution
                .gaps
                .push(gap(format!("component {} not found", instance.component)));
            continue;
        };
        let Some(interface) = component.interface(&ours.interface) else {
            resolution.gaps.push(gap(format!(
                "no interface '{}' on component {}",
                ours.interface, component.vlnv
            )));
            continue;
        };
        let Some(peer_instance) = design.instance(&theirs.instance) else {
            resolution
                .gaps
                .push(gap(format!("no instance '{}' in design", theirs.instance)));
            continue;
        };
        let Some(peer_component) = store.component(&peer_instance.component) else {
            resolution.gaps.push(gap(format!(
                "component {} not found",
                peer_instance.component
            )));
            continue;
        };
        let Some(peer_interface) = peer_component.interface(&theirs.interface) else {
            resolution.gaps.push(gap(format!(
                "no interface '{}' on component {}",
                theirs.interface, peer_component.vlnv
            )));
            continue;
        };

        debug!(
            connection = %connection.name,
            from = %ours,
            to = %theirs,
            "Resolved link"
        );
        resolution.links.push(ResolvedLink {
            connection,
            interface,
            peer_instance,
            peer_interface,
        });
    }

    resolution
}
