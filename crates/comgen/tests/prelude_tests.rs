//! The facade alone is enough to drive both generators.

#![allow(non_snake_case)]

use comgen::prelude::*;
use comgen::{
    ComConnection, ComInterface, ConnectionEndpoint, DiagnosticKind, Direction, SoftwareInstance,
    TransferType,
};
use std::path::{Path, PathBuf};

fn iface(name: &str, direction: Direction, port: &str) -> ComInterface {
    ComInterface::new(
        name,
        ProtocolFamily::mcapi().definition.vlnv,
        TransferType::Packet,
        direction,
    )
    .with_property("port_id", port)
    .with_property("handle_name", format!("{name}_h"))
    .with_property("remote_endpoint_name", format!("{name}_r"))
}

fn library() -> Library {
    let ping = Component::new(Vlnv::new("acme", "sw", "ping", "1.0"))
        .with_interface(iface("tx", Direction::Out, "1"));
    let pong = Component::new(Vlnv::new("acme", "sw", "pong", "1.0"))
        .with_interface(iface("rx", Direction::InOut, "2"));
    let design = Design::new(Vlnv::new("acme", "sys", "pingpong", "1.0"))
        .with_instance(SoftwareInstance::new("a", ping.vlnv.clone()))
        .with_instance(SoftwareInstance::new("b", pong.vlnv.clone()))
        .with_connection(ComConnection::new(
            "ab",
            ConnectionEndpoint::new("a", "tx"),
            ConnectionEndpoint::new("b", "rx"),
        ));

    let mut library = Library::new();
    library.add_component(ping);
    library.add_component(pong);
    library.add_component(Component::new(Vlnv::new("acme", "hw", "top", "1.0")));
    library.add_design(design);
    library
}

#[test]
fn prelude___component_then_system___both_generated() {
    let mut library = library();
    let family = ProtocolFamily::mcapi();
    let config = GeneratorConfig::default();
    let mut writer = MemoryWriter::new();

    let component = ComponentGenerator::new(&family, &config).generate(
        &mut library,
        &Vlnv::new("acme", "sw", "ping", "1.0"),
        Path::new("ping"),
        &mut writer,
        &mut AlwaysConfirm,
    );
    let system = SystemGenerator::new(&family, &config).generate(
        &mut library,
        &SystemRequest {
            design: Vlnv::new("acme", "sys", "pingpong", "1.0"),
            top: Vlnv::new("acme", "hw", "top", "1.0"),
            output_dir: PathBuf::from("sys"),
        },
        &mut writer,
        &mut AlwaysConfirm,
    );

    assert!(component.is_success());
    assert!(system.is_success());
    // node and domain ids are missing on both instances
    assert_eq!(system.count_of(DiagnosticKind::MissingInstanceProperty), 4);
    assert_eq!(writer.len(), 5);
    assert!(writer.get("sys/b/mcapi_instance.h").unwrap().contains("#define RX_R_PORT 1"));
}
