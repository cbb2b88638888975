#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

fn mcapi() -> Vlnv {
    Vlnv::new("comgen", "protocols", "MCAPI", "1.0")
}

fn scalar_out() -> ComInterface {
    ComInterface::new("out1", mcapi(), TransferType::Scalar, Direction::Out)
        .with_property(props::PORT_ID, "7")
        .with_property(props::HANDLE_NAME, "out1_chan")
        .with_property(props::REMOTE_ENDPOINT_NAME, "consumer_in1")
        .with_property(props::SCALAR_SIZE, "4")
}

#[test]
fn EndpointData___from_interface___copies_properties() {
    let data = EndpointData::from_interface(&scalar_out());

    assert_eq!(data.name, "out1");
    assert_eq!(data.port_id, "7");
    assert_eq!(data.handle_name, "out1_chan");
    assert_eq!(data.remote_name, "consumer_in1");
    assert_eq!(data.scalar_size.as_deref(), Some("4"));
    assert_eq!(data.node_id, UNSET_ID);
    assert!(data.is_channel());
}

#[test]
fn EndpointData___from_interface___derives_missing_names() {
    let iface = ComInterface::new("in-1", mcapi(), TransferType::Packet, Direction::In);

    let data = EndpointData::from_interface(&iface);

    assert_eq!(data.name, "in_1");
    assert_eq!(data.remote_name, "in_1_remote");
    assert_eq!(data.handle_name, "in_1_handle");
    assert_eq!(data.port_id, UNSET_ID);
}

#[test]
fn EndpointData___for_instance___takes_node_and_domain() {
    let instance = SoftwareInstance::new("cpu0", Vlnv::new("v", "l", "c", "1"))
        .with_property(props::NODE_ID, "3")
        .with_property(props::DOMAIN_ID, "1");

    let data = EndpointData::for_instance(&scalar_out(), &instance);

    assert_eq!(data.node_id, "3");
    assert_eq!(data.domain_id, "1");
    assert_eq!(data.local_macro(), "OUT1");
    assert_eq!(data.remote_macro(), "CONSUMER_IN1");
}

#[test]
fn NodeData___new___defaults_missing_ids_to_zero() {
    let instance = SoftwareInstance::new("cpu 0", Vlnv::new("v", "l", "c", "1"));

    let node = NodeData::new(&instance);

    assert_eq!(node.node_id, "0");
    assert_eq!(node.domain_id, "0");
    assert_eq!(node.output_dir, PathBuf::from("cpu_0"));
    assert!(node.links.is_empty());
}

#[test]
fn NodeData___peer_endpoints___skips_connection_only_peers() {
    let instance = SoftwareInstance::new("cpu0", Vlnv::new("v", "l", "c", "1"));
    let mut node = NodeData::new(&instance);
    let ours = EndpointData::from_interface(&scalar_out());
    node.push_link(ours.clone(), PeerRef::Connection("link0".to_string()));
    node.push_link(ours.clone(), PeerRef::Endpoint(ours.clone()));

    assert_eq!(node.peer_endpoints().count(), 1);
}

#[test_case("plain", "plain")]
#[test_case("with space", "with_space")]
#[test_case("9lives", "_9lives")]
#[test_case("", "_")]
fn c_identifier___sanitizes(input: &str, expected: &str) {
    assert_eq!(c_identifier(input), expected);
}
