#![allow(non_snake_case)]

use super::*;
use crate::{FileEntry, TransferType};
use tempfile::TempDir;

const LIBRARY: &str = r#"
[[com_definitions]]
vlnv = "comgen:protocols:MCAPI:1.0"
properties = [
    { name = "port_id", required = true },
    { name = "scalar_size" },
]

[[components]]
vlnv = "acme:sw:producer:1.0"

[[components.com_interfaces]]
name = "out1"
com_type = "comgen:protocols:MCAPI:1.0"
transfer_type = "scalar"
direction = "out"
properties = { port_id = "1", scalar_size = "4" }

[[components.sw_views]]
name = "firmware"

[[designs]]
vlnv = "acme:sys:demo:1.0"

[[designs.instances]]
name = "producer_0"
component = "acme:sw:producer:1.0"
"#;

fn producer() -> Vlnv {
    "acme:sw:producer:1.0".parse().unwrap()
}

#[test]
fn Library___from_str___parses_all_sections() {
    let library = Library::from_str(LIBRARY).unwrap();

    assert_eq!(library.com_definitions.len(), 1);
    assert_eq!(library.components.len(), 1);
    assert_eq!(library.designs.len(), 1);
    assert!(!library.is_dirty());
}

#[test]
fn Library___component___finds_by_vlnv() {
    let library = Library::from_str(LIBRARY).unwrap();

    let component = library.component(&producer()).unwrap();

    let iface = component.interface("out1").unwrap();
    assert_eq!(iface.transfer_type, TransferType::Scalar);
    assert_eq!(iface.property("scalar_size"), Some("4"));
}

#[test]
fn Library___com_definition___required_flag_defaults_false() {
    let library = Library::from_str(LIBRARY).unwrap();
    let vlnv: Vlnv = "comgen:protocols:MCAPI:1.0".parse().unwrap();

    let definition = library.com_definition(&vlnv).unwrap();

    assert!(definition.properties[0].required);
    assert!(!definition.properties[1].required);
    assert!(library.com_definition_named("mcapi").is_some());
}

#[test]
fn Library___from_str___invalid_vlnv_is_error() {
    let result = Library::from_str("[[components]]\nvlnv = \"not-a-vlnv\"\n");

    assert!(matches!(result, Err(GeneratorError::SerializationError(_))));
}

#[test]
fn Library___write_component_metadata___replaces_and_marks_dirty() {
    let mut library = Library::from_str(LIBRARY).unwrap();
    let mut component = library.component(&producer()).unwrap().clone();
    component
        .file_set_or_insert("generated_mcapi")
        .add_file(FileEntry::new("main.c"));

    library.write_component_metadata(&component).unwrap();

    assert!(library.is_dirty());
    let stored = library.component(&producer()).unwrap();
    assert!(stored.file_set("generated_mcapi").unwrap().contains("main.c"));
}

#[test]
fn Library___write_component_metadata___unknown_component_fails() {
    let mut library = Library::from_str(LIBRARY).unwrap();
    let stranger = Component::new(Vlnv::new("x", "y", "z", "1"));

    let result = library.write_component_metadata(&stranger);

    assert!(matches!(result, Err(GeneratorError::StoreWrite(_))));
    assert!(!library.is_dirty());
}

#[test]
fn Library___save___roundtrips_through_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("library.toml");
    let mut library = Library::from_str(LIBRARY).unwrap();
    let mut design = library.designs[0].clone();
    design.instances[0].file_set_ref = Some("demo_producer_0_headers".to_string());
    library.write_design_metadata(&design).unwrap();

    library.save(&path).unwrap();
    let reloaded = Library::load(&path).unwrap();

    assert!(!library.is_dirty());
    assert_eq!(
        reloaded.designs[0].instances[0].file_set_ref.as_deref(),
        Some("demo_producer_0_headers")
    );
}

#[test]
fn Library___load___missing_file_is_io_error() {
    let result = Library::load("/definitely/not/here/library.toml");

    assert!(matches!(result, Err(GeneratorError::Io(_))));
}

#[test]
fn Library___require_component___miss_is_unknown_component() {
    let library = Library::from_str(LIBRARY).unwrap();

    assert!(library.require_component(&producer()).is_ok());
    let err = library
        .require_component(&Vlnv::new("x", "y", "z", "1"))
        .unwrap_err();
    assert!(matches!(err, GeneratorError::UnknownComponent(ref v) if v == "x:y:z:1"));
}

#[test]
fn Library___require_design___miss_is_unknown_design() {
    let library = Library::from_str(LIBRARY).unwrap();

    let err = library.require_design(&producer()).unwrap_err();

    assert_eq!(err.error_code(), 4);
}
