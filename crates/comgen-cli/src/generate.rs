//! `generate-component` and `generate-system`

use crate::session::{Options, Session, coded};
use anyhow::Result;
use comgen_codegen::{ComponentGenerator, FsWriter, SystemGenerator, SystemRequest};
use comgen_core::{ProtocolFamily, Vlnv};
use std::path::{Path, PathBuf};

pub fn component(options: &Options, library: &Path, vlnv: &Vlnv, output: &Path) -> Result<bool> {
    let mut session = Session::open(options, library)?;
    session.library.require_component(vlnv).map_err(coded)?;
    let family = session.family(ProtocolFamily::MCAPI)?;
    let mut confirm = session.confirmation();

    let result = ComponentGenerator::new(&family, &session.config).generate(
        &mut session.library,
        vlnv,
        output,
        &mut FsWriter,
        &mut *confirm,
    );

    session.finish(&result)
}

pub fn system(
    options: &Options,
    library: &Path,
    design: &Vlnv,
    top: &Vlnv,
    family: &str,
    output: PathBuf,
) -> Result<bool> {
    let mut session = Session::open(options, library)?;
    session.library.require_design(design).map_err(coded)?;
    session.library.require_component(top).map_err(coded)?;
    let family = session.family(family)?;
    let mut confirm = session.confirmation();
    let request = SystemRequest {
        design: design.clone(),
        top: top.clone(),
        output_dir: output,
    };

    let result = SystemGenerator::new(&family, &session.config).generate(
        &mut session.library,
        &request,
        &mut FsWriter,
        &mut *confirm,
    );

    session.finish(&result)
}
