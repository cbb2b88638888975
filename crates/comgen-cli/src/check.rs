//! `check`: strict property validation of every component and a dry planning
//! pass over every design, for each built-in family

use crate::session::{Options, Session};
use anyhow::Result;
use comgen_codegen::{GenerationResult, SystemGenerator};
use comgen_core::{GeneratorConfig, Library, ProtocolFamily, Validator};
use std::path::Path;
use tracing::debug;

pub fn run(options: &Options, library: &Path) -> Result<bool> {
    let session = Session::open(options, library)?;
    let mut families = Vec::new();
    for name in [ProtocolFamily::MCAPI, ProtocolFamily::LITE] {
        families.push(session.family(name)?);
    }

    let result = check_library(&session.library, &families, &session.config);
    session.finish(&result)
}

fn check_library(
    library: &Library,
    families: &[ProtocolFamily],
    config: &GeneratorConfig,
) -> GenerationResult {
    let mut result = GenerationResult::new();
    let strict = Validator::strict();

    for family in families {
        for component in library.components.iter().filter(|c| family.applies_to(c)) {
            debug!(component = %component.vlnv, family = %family.name, "Checking component");
            result.extend(strict.validate_component(family, component));
        }
        for design in &library.designs {
            debug!(design = %design.vlnv, family = %family.name, "Planning design");
            result.extend(SystemGenerator::new(family, config).plan(library, design).diagnostics);
        }
    }
    result
}
