//! Single-component generation
//!
//! Emits `mcapicode.h`, `mcapicode.c` and `main.c` for one component from
//! its own interfaces. The peer identities the code needs
//! (`<REMOTE>_DOMAIN/_NODE/_PORT`, `LOCAL_NODE_ID`, `LOCAL_DOMAIN_ID`) come
//! from the per-instance header written by a design-level run.

use crate::registrar::{self, C_SOURCE, FileSetRegistrar};
use crate::writer::{CSourceWriter, c_escape, guard_name};
use crate::{ConfirmOverwrite, FileWriter, GenerationResult};
use comgen_core::{
    Diagnostic, DiagnosticKind, EndpointData, FileEntry, GeneratorConfig,
    HandshakePhase, MetadataStore, ProtocolFamily, Validator, Vlnv,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const HEADER_FILE: &str = "mcapicode.h";
pub const SOURCE_FILE: &str = "mcapicode.c";
pub const MAIN_FILE: &str = "main.c";

/// Generates the handshake implementation for a standalone component
pub struct ComponentGenerator<'a> {
    family: &'a ProtocolFamily,
    config: &'a GeneratorConfig,
}

impl<'a> ComponentGenerator<'a> {
    pub fn new(family: &'a ProtocolFamily, config: &'a GeneratorConfig) -> Self {
        Self { family, config }
    }

    /// Validate, confirm, write, then record the files on the component.
    ///
    /// A component without interfaces of the family is a no-op. Any missing
    /// required property aborts the run before anything is written.
    pub fn generate<S, W, C>(
        &self,
        store: &mut S,
        vlnv: &Vlnv,
        output_dir: &Path,
        writer: &mut W,
        confirm: &mut C,
    ) -> GenerationResult
    where
        S: MetadataStore + ?Sized,
        W: FileWriter + ?Sized,
        C: ConfirmOverwrite + ?Sized,
    {
        let mut result = GenerationResult::new();

        let Some(mut component) = store.component(vlnv).cloned() else {
            return result.abort(Diagnostic::error(
                DiagnosticKind::Metadata,
                format!("component {vlnv} not found"),
            ));
        };

        if !self.family.applies_to(&component) {
            info!(component = %component.vlnv, family = %self.family.name, "No interfaces to generate for");
            return result;
        }

        let problems = Validator::strict().validate_component(self.family, &component);
        if !problems.is_empty() {
            warn!(component = %component.vlnv, count = problems.len(), "Required properties missing");
            return result.abort_with(problems);
        }

        let endpoints: Vec<EndpointData> = self
            .family
            .qualifying_interfaces(&component)
            .map(EndpointData::from_interface)
            .collect();

        let files = [
            (HEADER_FILE, self.render_header(&endpoints)),
            (SOURCE_FILE, self.render_source(&endpoints)),
            (MAIN_FILE, self.render_main()),
        ];
        let targets: Vec<PathBuf> = files.iter().map(|(name, _)| output_dir.join(name)).collect();

        let replaced = registrar::files_about_to_be_replaced(&*writer, &targets);
        if !replaced.is_empty() && !confirm.confirm_overwrite(&replaced) {
            info!(component = %component.vlnv, "Overwrite declined");
            return result.abort(overwrite_declined(&replaced));
        }

        let mut written = Vec::new();
        for ((name, contents), target) in files.iter().zip(&targets) {
            match writer.write(target, contents) {
                Ok(()) => {
                    info!(path = %target.display(), "Generated file");
                    result.files_written.push(target.clone());
                    written.push(*name);
                }
                Err(err) => result.push(Diagnostic::error(
                    DiagnosticKind::Io,
                    format!("cannot write {}: {err}", target.display()),
                )),
            }
        }

        if written.is_empty() {
            return result;
        }

        let mut registrar = FileSetRegistrar::new(&mut component, &self.family.file_set_name);
        registrar.ensure_c_builder();
        for name in written {
            let mut entry = FileEntry::new(name).with_type(C_SOURCE);
            if name == HEADER_FILE {
                entry = entry.as_include();
            }
            registrar.register_file(entry);
        }
        if let Some(warning) = registrar.attach_to_sw_view(self.config) {
            result.push(warning);
        }

        if let Err(err) = store.write_component_metadata(&component) {
            result.push(Diagnostic::error(
                DiagnosticKind::Metadata,
                format!("cannot update component {}: {err}", component.vlnv),
            ));
        }

        result
    }

    pub fn render_header(&self, endpoints: &[EndpointData]) -> String {
        let guard = guard_name(HEADER_FILE);
        let mut w = CSourceWriter::from_config(self.config);

        w.file_banner(HEADER_FILE);
        w.begin_guard(&guard);
        w.include("mcapi.h", false);
        w.empty_line();

        w.header_comment("Node data.");
        w.empty_line();
        write_local_endpoints(&mut w, endpoints, true);
        write_remote_endpoints(&mut w, endpoints, true);
        w.empty_line();

        w.write_line("// Other variables.");
        w.write_line("extern mcapi_status_t status;");
        w.empty_line();

        w.header_comment("Functions.");
        w.empty_line();
        write_declaration(
            &mut w,
            &[
                "Main program implemented by the application.",
                "Has the same parameters as the main.",
            ],
            "int appmain(int argc, char* argv[]);",
        );
        write_declaration(
            &mut w,
            &["Initializes the MCAPI system and endpoints."],
            "int initializeMCAPI();",
        );
        for phase in HandshakePhase::ALL {
            let summary = match phase {
                HandshakePhase::Connect => "Connects all channels.",
                HandshakePhase::Open => "Opens all connections.",
                HandshakePhase::Close => "Closes all connections.",
            };
            write_declaration(
                &mut w,
                &[summary],
                &format!("int {}();", phase.function_name()),
            );
        }

        w.end_guard(&guard);
        w.finish()
    }

    pub fn render_source(&self, endpoints: &[EndpointData]) -> String {
        let mut w = CSourceWriter::from_config(self.config);

        w.file_banner(SOURCE_FILE);
        w.include(HEADER_FILE, true);
        w.include(&self.family.instance_header, true);
        w.include("stdio.h", false);
        w.include("errno.h", false);
        w.empty_line();

        w.header_comment("Constants.");
        w.empty_line();
        w.write_line(format!(
            "const mcapi_timeout_t TIMEOUT = {};",
            self.config.timeout
        ));
        w.empty_line();

        w.write_line("// Local port IDs.");
        for epd in endpoints {
            w.write_line(format!(
                "const mcapi_port_t {}_PORT = {};",
                epd.local_macro(),
                epd.port_id
            ));
        }
        w.empty_line();

        write_local_endpoints(&mut w, endpoints, false);
        write_remote_endpoints(&mut w, endpoints, false);
        w.empty_line();

        w.write_line("// Other variables.");
        w.write_line("mcapi_status_t status;");
        w.write_line("char status_msg[MCAPI_MAX_STATUS_MSG_LEN];");
        w.empty_line();

        write_initialize(&mut w, endpoints);

        let channels: Vec<&EndpointData> = endpoints.iter().filter(|e| e.is_channel()).collect();
        for phase in HandshakePhase::ALL {
            write_phase(&mut w, phase, &channels, self.config.retry_limit);
        }

        w.finish()
    }

    pub fn render_main(&self) -> String {
        let mut w = CSourceWriter::from_config(self.config);

        w.file_banner(MAIN_FILE);
        w.include("stdlib.h", false);
        w.include("stdio.h", false);
        w.include("errno.h", false);
        w.empty_line();
        w.write_line("// This header includes the generated MCAPI code.");
        w.include(HEADER_FILE, true);
        w.empty_line();

        w.write_line("int main(int argc, char* argv[])");
        w.begin_block();
        w.write_line("// Return value from application main.");
        w.write_line("int appReturn = 0;");
        w.empty_line();

        w.write_line("// Initialize MCAPI.");
        write_checked_call(&mut w, "initializeMCAPI", "MCAPI INITIALIZATION FAILED!!!");
        write_checked_call(
            &mut w,
            HandshakePhase::Connect.function_name(),
            "CONNECTING CHANNELS FAILED!!!",
        );
        write_checked_call(
            &mut w,
            HandshakePhase::Open.function_name(),
            "OPENING CHANNELS FAILED!!!",
        );

        w.write_line("// Branching to the application execution.");
        w.write_line("// NOTICE: This function must be implemented by application!");
        w.write_line("appReturn = appmain(argc, argv);");
        w.empty_line();

        w.write_line("// Close connections and finalize MCAPI before exiting.");
        write_checked_call(
            &mut w,
            HandshakePhase::Close.function_name(),
            "CLOSING CHANNELS FAILED!!!",
        );
        w.write_line("mcapi_finalize(&status);");
        w.empty_line();
        w.write_line("return appReturn;");
        w.end_block();

        w.finish()
    }
}

pub(crate) fn overwrite_declined(paths: &[PathBuf]) -> Diagnostic {
    let list: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
    Diagnostic::warning(
        DiagnosticKind::OverwriteDeclined,
        format!("overwrite declined; nothing written ({})", list.join(", ")),
    )
}

/// Channel handle type for a transfer kind and direction; `None` for messages
fn handle_type(epd: &EndpointData) -> Option<String> {
    let prefix = epd.transfer_type.channel_prefix()?;
    let side = if epd.direction.is_sender() { "send" } else { "recv" };
    Some(format!("mcapi_{prefix}chan_{side}_hndl_t"))
}

fn write_local_endpoints(w: &mut CSourceWriter, endpoints: &[EndpointData], external: bool) {
    let storage = if external { "extern " } else { "" };
    w.write_line("// Local endpoints.");
    for epd in endpoints {
        w.write_line(format!("{storage}mcapi_endpoint_t {};", epd.name));
        if let Some(handle) = handle_type(epd) {
            w.write_line(format!("{storage}{handle} {};", epd.handle_name));
        }
        w.empty_line();
    }
}

fn write_remote_endpoints(w: &mut CSourceWriter, endpoints: &[EndpointData], external: bool) {
    let storage = if external { "extern " } else { "" };
    w.write_line("// Remote endpoints.");
    for epd in endpoints {
        w.write_line(format!("{storage}mcapi_endpoint_t {};", epd.remote_name));
    }
}

fn write_declaration(w: &mut CSourceWriter, summary: &[&str], signature: &str) {
    w.write_line("/*");
    for line in summary {
        w.write_line(format!(" *  {line}"));
    }
    w.write_line(" *");
    w.write_line(" *        @return 0 if successful. -1 in case of an error.");
    w.write_line(" */");
    w.write_line(signature);
    w.empty_line();
}

fn write_checked_call(w: &mut CSourceWriter, function: &str, message: &str) {
    w.write_line(format!("if ({function}() != 0)"));
    w.begin_block();
    let message = c_escape(&message.replace('%', "%%"));
    w.write_line(format!("fprintf(stderr, \"{message}\\n\");"));
    w.write_line("return EXIT_FAILURE;");
    w.end_block();
    w.empty_line();
}

fn write_status_error(w: &mut CSourceWriter, what: &str) {
    let what = c_escape(&what.replace('%', "%%"));
    w.write_line("mcapi_display_status(status, status_msg, MCAPI_MAX_STATUS_MSG_LEN);");
    w.write_line(format!(
        "fprintf(stderr, \"ERROR: %s {what} at line %u.\\n\", status_msg, __LINE__);"
    ));
    w.write_line("return -1;");
}

fn write_initialize(w: &mut CSourceWriter, endpoints: &[EndpointData]) {
    w.header_comment("Function: initializeMCAPI()");
    w.write_line("int initializeMCAPI()");
    w.begin_block();
    w.write_line("mcapi_info_t info;");
    w.empty_line();

    w.write_line("// Initialize MCAPI implementation.");
    w.write_line("mcapi_initialize(LOCAL_DOMAIN_ID, LOCAL_NODE_ID, 0, 0, &info, &status);");
    w.empty_line();
    w.write_line("if (status != MCAPI_SUCCESS)");
    w.begin_block();
    w.write_line("mcapi_display_status(status, status_msg, MCAPI_MAX_STATUS_MSG_LEN);");
    w.write_line(
        "fprintf(stderr, \"ERROR: %s Failed to initialize node %u at domain %u at line %u.\\n\", status_msg, LOCAL_NODE_ID, LOCAL_DOMAIN_ID, __LINE__);",
    );
    w.write_line("return -1;");
    w.end_block();
    w.empty_line();

    w.write_line("// Create local endpoints.");
    for epd in endpoints {
        w.write_line(format!(
            "{} = mcapi_endpoint_create({}_PORT, &status);",
            epd.name,
            epd.local_macro()
        ));
        w.empty_line();
        w.write_line("if (status != MCAPI_SUCCESS)");
        w.begin_block();
        write_status_error(w, &format!("Failed to create endpoint {}", epd.name));
        w.end_block();
        w.empty_line();
    }

    w.write_line("// Retrieve remote endpoints.");
    for epd in endpoints {
        let remote = epd.remote_macro();
        w.write_line(format!(
            "{} = mcapi_endpoint_get({remote}_DOMAIN, {remote}_NODE, {remote}_PORT, TIMEOUT, &status);",
            epd.remote_name
        ));
        w.empty_line();
        w.write_line("if (status != MCAPI_SUCCESS)");
        w.begin_block();
        write_status_error(w, &format!("Failed to get remote endpoint {}", epd.remote_name));
        w.end_block();
        w.empty_line();
    }

    w.write_line("return 0;");
    w.end_block();
    w.empty_line();
}

/// Non-blocking call issuing `phase` for one channel end
fn issue_call(phase: HandshakePhase, epd: &EndpointData) -> String {
    let prefix = epd.transfer_type.channel_prefix().unwrap_or("pkt");
    let side = if epd.direction.is_sender() { "send" } else { "recv" };
    match phase {
        HandshakePhase::Connect => format!(
            "mcapi_{prefix}chan_connect_i({}, {}, &request, &status);",
            epd.name, epd.remote_name
        ),
        HandshakePhase::Open => format!(
            "mcapi_{prefix}chan_{side}_open_i(&{}, {}, &request, &status);",
            epd.handle_name, epd.name
        ),
        HandshakePhase::Close => format!(
            "mcapi_{prefix}chan_{side}_close_i({}, &request, &status);",
            epd.handle_name
        ),
    }
}

/// One of `connectChannels`, `openConnections`, `closeConnections`:
/// issue every channel, poll pending ones up to `retry_limit` rounds, then
/// fail if any channel is still incomplete.
fn write_phase(
    w: &mut CSourceWriter,
    phase: HandshakePhase,
    channels: &[&EndpointData],
    retry_limit: u32,
) {
    let verb = phase.verb();
    let name = phase.function_name();

    w.header_comment(&format!("Function: {name}()"));
    w.write_line(format!("int {name}()"));
    w.begin_block();

    if channels.is_empty() {
        w.write_line("return 0;");
        w.end_block();
        w.empty_line();
        return;
    }

    let count = channels.len();
    w.write_line(format!("const size_t channelCount = {count};"));
    w.write_line(format!("const int tryMaximum = {retry_limit};"));
    w.write_line("mcapi_request_t request;");
    w.write_line(format!("mcapi_request_t {verb}_request[{count}];"));
    w.write_line(format!("char {verb}_complete[{count}];"));
    w.write_line("size_t size = 0;");
    w.write_line("size_t ifIter = 0;");
    w.write_line("int retry = 0;");
    w.empty_line();

    for epd in channels {
        if phase.issues_for(epd.direction) {
            w.write_line(issue_call(phase, epd));
            w.empty_line();
            w.write_line("if (status == MCAPI_PENDING)");
            w.begin_block();
            w.write_line(format!("{verb}_request[ifIter] = request;"));
            w.write_line(format!("{verb}_complete[ifIter] = 0;"));
            w.end_block();
            w.write_line("else if (status != MCAPI_SUCCESS)");
            w.begin_block();
            write_status_error(w, &format!("Failed to {verb} channel {}", epd.name));
            w.end_block();
            w.write_line("else");
            w.begin_block();
            w.write_line(format!("{verb}_complete[ifIter] = 1;"));
            w.end_block();
        } else {
            w.write_line(format!("{verb}_complete[ifIter] = 1;"));
        }
        w.write_line("++ifIter;");
        w.empty_line();
    }

    w.write_line("for (retry = 0; retry < tryMaximum; ++retry)");
    w.begin_block();
    w.write_line("for (ifIter = 0; ifIter < channelCount; ++ifIter)");
    w.begin_block();
    w.write_line(format!("if ({verb}_complete[ifIter] != 1)"));
    w.begin_block();
    w.write_line(format!(
        "if (mcapi_wait(&{verb}_request[ifIter], &size, TIMEOUT, &status) == MCAPI_TRUE && status == MCAPI_SUCCESS)"
    ));
    w.begin_block();
    w.write_line(format!("{verb}_complete[ifIter] = 1;"));
    w.end_block();
    w.end_block();
    w.end_block();
    w.end_block();
    w.empty_line();

    w.write_line("for (ifIter = 0; ifIter < channelCount; ++ifIter)");
    w.begin_block();
    w.write_line(format!("if ({verb}_complete[ifIter] != 1)"));
    w.begin_block();
    w.write_line("mcapi_display_status(status, status_msg, MCAPI_MAX_STATUS_MSG_LEN);");
    w.write_line(format!(
        "fprintf(stderr, \"ERROR: %s Failed to {verb} channel %u at line %u.\\n\", status_msg, (unsigned) ifIter, __LINE__);"
    ));
    w.write_line("return -1;");
    w.end_block();
    w.end_block();
    w.empty_line();

    w.write_line("return 0;");
    w.end_block();
    w.empty_line();
}
