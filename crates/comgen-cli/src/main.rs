//! comgen CLI - Endpoint resolver and handshake code generator
//!
//! Commands:
//! - `comgen generate-component` - Emit the MCAPI handshake sources for one component
//! - `comgen generate-system` - Emit per-instance headers for a whole design
//! - `comgen check` - Validate every component and design in a library

use clap::{Parser, Subcommand};
use comgen_core::{LogLevel, Vlnv};
use std::path::PathBuf;
use std::process::ExitCode;

mod check;
mod confirm;
mod generate;
mod report;
mod session;

#[derive(Parser)]
#[command(name = "comgen")]
#[command(author, version, about = "MCAPI endpoint resolver and handshake code generator", long_about = None)]
struct Cli {
    /// Generator configuration file (TOML, or JSON with a .json extension)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off); overrides the configuration
    #[arg(long, global = true, value_parser = parse_level)]
    log_level: Option<LogLevel>,

    /// Overwrite existing files without asking
    #[arg(short, long, global = true)]
    yes: bool,

    /// Print the run result as JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate mcapicode.h, mcapicode.c and main.c for one component
    GenerateComponent {
        /// Path to the TOML library
        #[arg(short, long)]
        library: PathBuf,

        /// Component VLNV (vendor:library:name:version)
        #[arg(long)]
        component: Vlnv,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Generate one header per software instance of a design
    GenerateSystem {
        /// Path to the TOML library
        #[arg(short, long)]
        library: PathBuf,

        /// Design VLNV
        #[arg(short, long)]
        design: Vlnv,

        /// Top component whose system view is built from the design
        #[arg(short, long)]
        top: Vlnv,

        /// Protocol family (mcapi, lite)
        #[arg(short, long, default_value = "mcapi")]
        family: String,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Validate components and designs without writing anything
    Check {
        /// Path to the TOML library
        #[arg(short, long)]
        library: PathBuf,
    },
}

fn parse_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::parse(value).ok_or_else(|| format!("unknown log level: {value}"))
}

impl Cli {
    fn options(&self) -> session::Options {
        session::Options {
            config: self.config.clone(),
            log_level: self.log_level,
            assume_yes: self.yes,
            json: self.json,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let options = cli.options();

    let success = match cli.command {
        Commands::GenerateComponent {
            library,
            component,
            output,
        } => generate::component(&options, &library, &component, &output)?,
        Commands::GenerateSystem {
            library,
            design,
            top,
            family,
            output,
        } => generate::system(&options, &library, &design, &top, &family, output)?,
        Commands::Check { library } => check::run(&options, &library)?,
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use clap::CommandFactory;

    #[test]
    fn Cli___definition___is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn Cli___generate_system___parses_vlnvs_and_default_family() {
        let cli = Cli::try_parse_from([
            "comgen",
            "generate-system",
            "--library",
            "lib.toml",
            "--design",
            "acme:sys:demo:1.0",
            "--top",
            "acme:hw:board:1.0",
            "--output",
            "out",
            "--yes",
        ])
        .unwrap();

        assert!(cli.yes);
        match cli.command {
            Commands::GenerateSystem { design, family, .. } => {
                assert_eq!(design.name, "demo");
                assert_eq!(family, "mcapi");
            }
            _ => panic!("expected generate-system"),
        }
    }

    #[test]
    fn Cli___malformed_vlnv___rejected() {
        let result = Cli::try_parse_from([
            "comgen",
            "generate-component",
            "--library",
            "lib.toml",
            "--component",
            "producer",
            "--output",
            "out",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn Cli___log_level___parsed_case_insensitively() {
        let cli = Cli::try_parse_from(["comgen", "--log-level", "DEBUG", "check", "-l", "lib.toml"])
            .unwrap();

        assert_eq!(cli.log_level, Some(LogLevel::Debug));
    }
}
