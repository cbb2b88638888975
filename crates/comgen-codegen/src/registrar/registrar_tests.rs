#![allow(non_snake_case)]

use super::*;
use crate::MemoryWriter;
use comgen_core::{SwView, Vlnv};

fn component() -> Component {
    Component::new(Vlnv::new("acme", "sw", "producer", "1.0"))
}

fn view(name: &str) -> SwView {
    SwView {
        name: name.to_string(),
        file_set_refs: Vec::new(),
    }
}

#[test]
fn FileSetRegistrar___same_path_twice___single_entry() {
    let mut component = component();
    let mut registrar = FileSetRegistrar::new(&mut component, "generated_mcapi");

    let first = registrar.register_file(FileEntry::new("x.h"));
    let second = registrar.register_file(FileEntry::new("x.h"));

    assert!(!first);
    assert!(second);
    let set = registrar.file_set().unwrap();
    assert_eq!(set.files.len(), 1);
    assert_eq!(set.files[0].path, "x.h");
}

#[test]
fn FileSetRegistrar___new___creates_set_in_source_group_once() {
    let mut component = component();

    FileSetRegistrar::new(&mut component, "generated_mcapi");
    FileSetRegistrar::new(&mut component, "generated_mcapi");

    assert_eq!(component.file_sets.len(), 1);
    assert_eq!(component.file_sets[0].groups, vec![SOURCE_GROUP.to_string()]);
}

#[test]
fn FileSetRegistrar___ensure_c_builder___added_once() {
    let mut component = component();
    let mut registrar = FileSetRegistrar::new(&mut component, "generated_mcapi");

    assert!(registrar.ensure_c_builder());
    assert!(!registrar.ensure_c_builder());

    let builders = &registrar.file_set().unwrap().default_builders;
    assert_eq!(builders.len(), 1);
    assert_eq!(builders[0].command, DEFAULT_C_BUILDER);
    assert!(builders[0].replace_default_flags);
}

#[test]
fn FileSetRegistrar___single_sw_view___referenced() {
    let mut component = component();
    component.sw_views.push(view("firmware"));
    let mut registrar = FileSetRegistrar::new(&mut component, "generated_mcapi");

    let warning = registrar.attach_to_sw_view(&GeneratorConfig::default());
    registrar.attach_to_sw_view(&GeneratorConfig::default());

    assert!(warning.is_none());
    assert_eq!(component.sw_views[0].file_set_refs, vec!["generated_mcapi"]);
}

#[test]
fn FileSetRegistrar___several_views_without_choice___warns() {
    let mut component = component();
    component.sw_views.push(view("debug"));
    component.sw_views.push(view("release"));
    let mut registrar = FileSetRegistrar::new(&mut component, "generated_mcapi");

    let warning = registrar.attach_to_sw_view(&GeneratorConfig::default()).unwrap();

    assert_eq!(warning.kind, DiagnosticKind::Metadata);
    assert!(!warning.is_fatal());
    assert!(component.sw_views.iter().all(|v| v.file_set_refs.is_empty()));
}

#[test]
fn FileSetRegistrar___several_views_with_choice___references_chosen() {
    let mut component = component();
    component.sw_views.push(view("debug"));
    component.sw_views.push(view("release"));
    let config = GeneratorConfig {
        sw_view: Some("release".to_string()),
        ..GeneratorConfig::default()
    };
    let mut registrar = FileSetRegistrar::new(&mut component, "generated_mcapi");

    assert!(registrar.attach_to_sw_view(&config).is_none());

    assert!(component.sw_views[0].file_set_refs.is_empty());
    assert_eq!(component.sw_views[1].file_set_refs, vec!["generated_mcapi"]);
}

#[test]
fn FileSetRegistrar___chosen_view_missing___warns() {
    let mut component = component();
    component.sw_views.push(view("debug"));
    component.sw_views.push(view("release"));
    let config = GeneratorConfig {
        sw_view: Some("profiling".to_string()),
        ..GeneratorConfig::default()
    };
    let mut registrar = FileSetRegistrar::new(&mut component, "generated_mcapi");

    let warning = registrar.attach_to_sw_view(&config).unwrap();

    assert!(warning.message.contains("profiling"));
}

#[test]
fn file_set_ref___assigned_once_then_reused() {
    let mut instance = SoftwareInstance::new("cpu0", Vlnv::new("v", "l", "c", "1"));

    let first = file_set_ref(&mut instance, "hw_view");
    let second = file_set_ref(&mut instance, "other_view");

    assert_eq!(first, "hw_view_cpu0_headers");
    assert_eq!(second, first);
    assert_eq!(instance.file_set_ref.as_deref(), Some("hw_view_cpu0_headers"));
}

#[test]
fn register_instance_file___twice___idempotent() {
    let mut top = component();
    let mut instance = SoftwareInstance::new("cpu0", Vlnv::new("v", "l", "c", "1"));

    let first = register_instance_file(&mut top, &mut instance, "sys", FileEntry::new("cpu0/x.h"));
    let second = register_instance_file(&mut top, &mut instance, "sys", FileEntry::new("cpu0/x.h"));

    assert!(!first);
    assert!(second);
    assert_eq!(top.file_set("sys_cpu0_headers").unwrap().files.len(), 1);
}

#[test]
fn files_about_to_be_replaced___only_existing_paths() {
    let writer = MemoryWriter::new().with_file("out/cpu0/mcapi_instance.h", "old");
    let targets = vec![
        PathBuf::from("out/cpu0/mcapi_instance.h"),
        PathBuf::from("out/cpu1/mcapi_instance.h"),
    ];

    let replaced = files_about_to_be_replaced(&writer, &targets);

    assert_eq!(replaced, vec![PathBuf::from("out/cpu0/mcapi_instance.h")]);
}

#[test]
fn file_set_path___joins_with_forward_slashes() {
    let path = Path::new("cpu0").join("mcapi_instance.h");

    assert_eq!(file_set_path(&path), "cpu0/mcapi_instance.h");
}
