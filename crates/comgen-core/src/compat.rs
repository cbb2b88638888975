//! Cross-connection compatibility checks
//!
//! Every rule is evaluated; nothing here stops generation. All findings are
//! warnings.

use crate::endpoint::props;
use crate::{
    ComInterface, Diagnostic, DiagnosticKind, ProtocolFamily, ResolvedLink, SoftwareInstance,
    TransferType, Validator,
};

/// Check that two connected interfaces agree on how data moves.
pub fn check(
    family: &ProtocolFamily,
    ours: &ComInterface,
    peer: &ComInterface,
    our_instance: &SoftwareInstance,
    peer_instance: &SoftwareInstance,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let our_end = format!("{}.{}", our_instance.name, ours.name);
    let peer_end = format!("{}.{}", peer_instance.name, peer.name);

    if ours.transfer_type != peer.transfer_type {
        diagnostics.push(Diagnostic::warning(
            DiagnosticKind::TransferTypeMismatch,
            format!(
                "transfer type mismatch: {} is {} but {} is {}",
                our_end, ours.transfer_type, peer_end, peer.transfer_type
            ),
        ));
    }

    if ours.transfer_type == TransferType::Scalar {
        let our_size = ours.property(props::SCALAR_SIZE);
        let peer_size = peer.property(props::SCALAR_SIZE);
        if our_size != peer_size {
            diagnostics.push(Diagnostic::warning(
                DiagnosticKind::ScalarSizeMismatch,
                format!(
                    "scalar size mismatch: {} has {} but {} has {}",
                    our_end,
                    our_size.unwrap_or("no size"),
                    peer_end,
                    peer_size.unwrap_or("no size")
                ),
            ));
        }
    }

    let owner = format!("instance '{}'", peer_instance.name);
    diagnostics.extend(Validator::collect().validate(&family.definition, peer, &owner));

    diagnostics
}

/// [`check`] applied to a resolved link
pub fn check_link(
    family: &ProtocolFamily,
    our_instance: &SoftwareInstance,
    link: &ResolvedLink<'_>,
) -> Vec<Diagnostic> {
    check(
        family,
        link.interface,
        link.peer_interface,
        our_instance,
        link.peer_instance,
    )
}
