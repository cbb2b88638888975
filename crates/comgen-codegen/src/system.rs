//! Design-level generation
//!
//! Builds a [`NodeData`] for every instance whose component carries the
//! family's interfaces, then writes one header per instance into
//! `<output>/<instance>/`. Handshake families get local identity constants,
//! one `_DOMAIN/_NODE/_PORT` triple per remote endpoint and a table of
//! endpoint records. Static-table families get a `{name, maxTransferSize}`
//! record per connection.

use crate::component::overwrite_declined;
use crate::registrar::{self, C_SOURCE};
use crate::writer::{CSourceWriter, c_string, guard_name};
use crate::{ConfirmOverwrite, FileWriter, GenerationResult};
use comgen_core::{
    CodegenTemplate, ComConnection, Design, Diagnostic, DiagnosticKind, EndpointData, FileEntry,
    GeneratorConfig, MetadataStore, NodeData, PeerRef, ProtocolFamily, Validator, Vlnv, compat,
    props, resolve,
};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What a design-level run should generate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemRequest {
    pub design: Vlnv,
    /// Component whose system view is built from `design`
    pub top: Vlnv,
    pub output_dir: PathBuf,
}

/// Nodes ready to render, plus what was found on the way
#[derive(Debug, Clone, Default)]
pub struct SystemPlan {
    pub nodes: Vec<NodeData>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Generates per-instance headers for a whole design
pub struct SystemGenerator<'a> {
    family: &'a ProtocolFamily,
    config: &'a GeneratorConfig,
}

impl<'a> SystemGenerator<'a> {
    pub fn new(family: &'a ProtocolFamily, config: &'a GeneratorConfig) -> Self {
        Self { family, config }
    }

    pub fn generate<S, W, C>(
        &self,
        store: &mut S,
        request: &SystemRequest,
        writer: &mut W,
        confirm: &mut C,
    ) -> GenerationResult
    where
        S: MetadataStore + ?Sized,
        W: FileWriter + ?Sized,
        C: ConfirmOverwrite + ?Sized,
    {
        let mut result = GenerationResult::new();

        let Some(mut design) = store.design(&request.design).cloned() else {
            return result.abort(Diagnostic::error(
                DiagnosticKind::Metadata,
                format!("design {} not found", request.design),
            ));
        };
        let Some(mut top) = store.component(&request.top).cloned() else {
            return result.abort(Diagnostic::error(
                DiagnosticKind::Metadata,
                format!("top component {} not found", request.top),
            ));
        };

        let plan = self.plan(&*store, &design);
        result.extend(plan.diagnostics);

        let header = &self.family.instance_header;
        let mut claimed: BTreeMap<PathBuf, &str> = BTreeMap::new();
        let mut nodes = Vec::new();
        let mut targets = Vec::new();
        for node in &plan.nodes {
            let target = instance_header_path(&request.output_dir, node, self.family);
            if let Some(first) = claimed.get(&target) {
                result.push(Diagnostic::error(
                    DiagnosticKind::Io,
                    format!(
                        "instances '{first}' and '{}' both map to {}; '{}' not generated",
                        node.instance,
                        target.display(),
                        node.instance
                    ),
                ));
                continue;
            }
            claimed.insert(target.clone(), &node.instance);
            nodes.push(node);
            targets.push(target);
        }

        let replaced = registrar::files_about_to_be_replaced(&*writer, &targets);
        if !replaced.is_empty() && !confirm.confirm_overwrite(&replaced) {
            info!(design = %design.vlnv, "Overwrite declined");
            return result.abort(overwrite_declined(&replaced));
        }

        let system_view = top
            .system_view_for(&design.vlnv)
            .map(|v| v.name.clone())
            .unwrap_or_else(|| design.vlnv.name.clone());

        for (node, target) in nodes.iter().zip(&targets) {
            let contents = self.render_instance_header(node);
            if let Err(err) = writer.write(target, &contents) {
                result.push(Diagnostic::error(
                    DiagnosticKind::Io,
                    format!("cannot write {}: {err}", target.display()),
                ));
                continue;
            }
            info!(instance = %node.instance, path = %target.display(), "Generated file");
            result.files_written.push(target.clone());

            let Some(instance) = design.instance_mut(&node.instance) else {
                continue;
            };
            let entry = FileEntry::new(registrar::file_set_path(&node.output_dir.join(header)))
                .with_type(C_SOURCE)
                .as_include();
            registrar::register_instance_file(&mut top, instance, &system_view, entry);
        }

        if result.files_written.is_empty() {
            return result;
        }
        if let Err(err) = store.write_component_metadata(&top) {
            result.push(Diagnostic::error(
                DiagnosticKind::Metadata,
                format!("cannot update component {}: {err}", top.vlnv),
            ));
        }
        if let Err(err) = store.write_design_metadata(&design) {
            result.push(Diagnostic::error(
                DiagnosticKind::Metadata,
                format!("cannot update design {}: {err}", design.vlnv),
            ));
        }

        info!(
            design = %design.vlnv,
            files = result.files_written.len(),
            warnings = result.warnings().count(),
            "Design generation finished"
        );
        result
    }

    /// Resolve and check every qualifying instance without writing anything
    pub fn plan<S>(&self, store: &S, design: &Design) -> SystemPlan
    where
        S: MetadataStore + ?Sized,
    {
        let mut plan = SystemPlan::default();
        let mut compared: BTreeSet<*const ComConnection> = BTreeSet::new();

        for instance in &design.instances {
            let Some(component) = store.component(&instance.component) else {
                plan.diagnostics.push(Diagnostic::warning(
                    DiagnosticKind::Metadata,
                    format!(
                        "instance '{}' refers to unknown component {}",
                        instance.name, instance.component
                    ),
                ));
                continue;
            };
            if !self.family.applies_to(component) {
                continue;
            }

            let mut node = NodeData::new(instance);
            if self.family.template == CodegenTemplate::Handshake {
                for key in [props::NODE_ID, props::DOMAIN_ID] {
                    if instance.property(key).is_none() {
                        plan.diagnostics.push(Diagnostic::warning(
                            DiagnosticKind::MissingInstanceProperty,
                            format!(
                                "instance '{}' has no {key}; 0 is used",
                                instance.name
                            ),
                        ));
                    }
                }
            }

            let resolution = resolve(store, design, instance);
            if self.config.report_unresolved {
                for gap in &resolution.gaps {
                    warn!("{}", gap.message);
                }
                plan.diagnostics.extend(resolution.gaps.iter().cloned());
            }

            for link in &resolution.links {
                if !self.family.qualifies(link.interface) {
                    debug!(
                        instance = %instance.name,
                        interface = %link.interface.name,
                        "Interface of another family skipped"
                    );
                    continue;
                }
                if !self.family.supports(link.interface.transfer_type) {
                    plan.diagnostics.push(Diagnostic::warning(
                        DiagnosticKind::TransferTypeMismatch,
                        format!(
                            "{}.{} uses {} transfers, which {} does not carry",
                            instance.name,
                            link.interface.name,
                            link.interface.transfer_type,
                            self.family.name
                        ),
                    ));
                }

                let ours = EndpointData::for_instance(link.interface, instance);
                let peer = if self.family.peer_resolution {
                    // A mismatch is reported once per connection, not once per side.
                    // Names need not be unique, so connections are told apart by address.
                    let first_side = compared.insert(std::ptr::from_ref(link.connection));
                    let mut findings = compat::check_link(self.family, instance, link);
                    findings.retain(|f| {
                        first_side
                            || !matches!(
                                f.kind,
                                DiagnosticKind::TransferTypeMismatch
                                    | DiagnosticKind::ScalarSizeMismatch
                            )
                    });
                    for finding in &findings {
                        warn!("{}", finding.message);
                    }
                    plan.diagnostics.extend(findings);
                    PeerRef::Endpoint(EndpointData::for_instance(
                        link.peer_interface,
                        link.peer_instance,
                    ))
                } else {
                    let owner = format!("instance '{}'", instance.name);
                    plan.diagnostics.extend(Validator::collect().validate(
                        &self.family.definition,
                        link.interface,
                        &owner,
                    ));
                    PeerRef::Connection(link.connection.name.clone())
                };
                node.push_link(ours, peer);
            }

            plan.diagnostics.extend(conflicting_remote_macros(&node));
            plan.nodes.push(node);
        }

        plan
    }

    pub fn render_instance_header(&self, node: &NodeData) -> String {
        match self.family.template {
            CodegenTemplate::Handshake => self.render_handshake_header(node),
            CodegenTemplate::StaticTable => self.render_table_header(node),
        }
    }

    fn render_handshake_header(&self, node: &NodeData) -> String {
        let file = &self.family.instance_header;
        let guard = guard_name(file);
        let mut w = CSourceWriter::from_config(self.config);

        w.file_banner(file);
        w.begin_guard(&guard);
        w.include("mcapi.h", false);
        w.empty_line();

        w.write_line(format!("// Instance {} of {}.", node.instance, node.component));
        w.write_line(format!("#define LOCAL_NODE_ID {}", node.node_id));
        w.write_line(format!("#define LOCAL_DOMAIN_ID {}", node.domain_id));
        w.empty_line();

        w.write_line("// Remote endpoints.");
        let mut defined = BTreeSet::new();
        for (ours, peer) in &node.links {
            let PeerRef::Endpoint(remote) = peer else {
                continue;
            };
            let prefix = ours.remote_macro();
            if !defined.insert(prefix.clone()) {
                continue;
            }
            w.write_line(format!("#define {prefix}_DOMAIN {}", remote.domain_id));
            w.write_line(format!("#define {prefix}_NODE {}", remote.node_id));
            w.write_line(format!("#define {prefix}_PORT {}", remote.port_id));
            w.empty_line();
        }

        w.write_line("typedef struct");
        w.begin_block();
        w.write_line("const char* local;");
        w.write_line("const char* remote;");
        w.write_line("mcapi_domain_t domain;");
        w.write_line("mcapi_node_t node;");
        w.write_line("mcapi_port_t port;");
        w.end_block_with(" endpoint_def_t;");
        w.empty_line();

        let records: Vec<(&EndpointData, &EndpointData)> = node
            .links
            .iter()
            .filter_map(|(ours, peer)| match peer {
                PeerRef::Endpoint(remote) => Some((ours, remote)),
                PeerRef::Connection(_) => None,
            })
            .collect();
        w.write_line(format!("#define ENDPOINT_DEF_COUNT {}", records.len()));
        if !records.is_empty() {
            w.write_line("static const endpoint_def_t ENDPOINT_DEFS[ENDPOINT_DEF_COUNT] =");
            w.begin_block();
            for (ours, remote) in records {
                w.write_line(format!(
                    "{{ {}, {}, {}, {}, {} }},",
                    c_string(&ours.name),
                    c_string(&ours.remote_name),
                    remote.domain_id,
                    remote.node_id,
                    remote.port_id
                ));
            }
            w.end_block_with(";");
        }
        w.empty_line();

        w.end_guard(&guard);
        w.finish()
    }

    fn render_table_header(&self, node: &NodeData) -> String {
        let file = &self.family.instance_header;
        let guard = guard_name(file);
        let mut w = CSourceWriter::from_config(self.config);

        w.file_banner(file);
        w.begin_guard(&guard);
        w.include("stddef.h", false);
        w.empty_line();

        w.write_line(format!("// Instance {} of {}.", node.instance, node.component));
        w.write_line("typedef struct");
        w.begin_block();
        w.write_line("const char* name;");
        w.write_line("size_t maxTransferSize;");
        w.end_block_with(" connection_def_t;");
        w.empty_line();

        w.write_line(format!("#define CONNECTION_DEF_COUNT {}", node.links.len()));
        if !node.links.is_empty() {
            w.write_line("static const connection_def_t CONNECTION_DEFS[CONNECTION_DEF_COUNT] =");
            w.begin_block();
            for (ours, peer) in &node.links {
                let name = match peer {
                    PeerRef::Connection(name) => name.as_str(),
                    PeerRef::Endpoint(_) => ours.name.as_str(),
                };
                let size = ours
                    .max_transfer_size
                    .as_deref()
                    .unwrap_or(comgen_core::UNSET_ID);
                w.write_line(format!("{{ {}, {size} }},", c_string(name)));
            }
            w.end_block_with(";");
        }
        w.empty_line();

        w.end_guard(&guard);
        w.finish()
    }
}

/// Warnings for remote macros that two links would define with different values.
/// The header keeps the first definition.
fn conflicting_remote_macros(node: &NodeData) -> Vec<Diagnostic> {
    let mut first: BTreeMap<String, &EndpointData> = BTreeMap::new();
    let mut diagnostics = Vec::new();
    for (ours, peer) in &node.links {
        let PeerRef::Endpoint(remote) = peer else {
            continue;
        };
        let kept = match first.entry(ours.remote_macro()) {
            Entry::Vacant(slot) => {
                slot.insert(remote);
                continue;
            }
            Entry::Occupied(slot) => *slot.get(),
        };
        let same = (&kept.domain_id, &kept.node_id, &kept.port_id)
            == (&remote.domain_id, &remote.node_id, &remote.port_id);
        if !same {
            let message = format!(
                "instance '{}': {} is bound to {}/{}/{} and {}/{}/{} (domain/node/port); only the first is emitted",
                node.instance,
                ours.remote_macro(),
                kept.domain_id,
                kept.node_id,
                kept.port_id,
                remote.domain_id,
                remote.node_id,
                remote.port_id
            );
            warn!("{message}");
            diagnostics.push(Diagnostic::warning(DiagnosticKind::Metadata, message));
        }
    }
    diagnostics
}

/// Output path of an instance header below `output_dir`
pub fn instance_header_path(output_dir: &Path, node: &NodeData, family: &ProtocolFamily) -> PathBuf {
    output_dir.join(&node.output_dir).join(&family.instance_header)
}
