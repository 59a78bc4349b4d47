//! # Validate Command
//!
//! Turns command-line flags into a [`ModeSet`], runs the orchestrator and
//! prints the report.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use stacv_core::{Fetcher, ValidatorConfig};
use stacv_engine::{all_valid, report, Orchestrator};
use stacv_schema::ModeSet;

/// Arguments for validating one STAC document.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// URL or path of the STAC document to validate.
    #[arg(value_name = "STAC_FILE")]
    pub stac_file: String,

    /// Validate against the core schema for the object's kind and version.
    #[arg(long)]
    pub core: bool,

    /// Validate against the core schema and every declared extension schema.
    #[arg(long)]
    pub extensions: bool,

    /// Follow child and item links and validate every reachable object.
    #[arg(long)]
    pub recursive: bool,

    /// Use the override schemas for legacy STAC versions.
    #[arg(long)]
    pub homegrown: bool,

    /// Validate against a custom schema (URL or path).
    #[arg(short = 'c', long, value_name = "SCHEMA")]
    pub custom: Option<String>,
}

impl ValidateArgs {
    /// Requested modes. No mode flag means extension validation.
    pub fn modes(&self) -> ModeSet {
        let modes = ModeSet {
            homegrown: self.homegrown,
            recursive: self.recursive,
            core: self.core,
            extensions: self.extensions,
            custom: self.custom.clone(),
        };
        if modes.is_empty() {
            ModeSet {
                extensions: true,
                ..modes
            }
        } else {
            modes
        }
    }
}

/// Validate and print the report to stdout.
///
/// Returns exit code: 0 when every record is valid, 1 otherwise. Errors are
/// operational (configuration, HTTP client setup) and map to exit code 2.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let config = ValidatorConfig::from_env().context("invalid validator configuration")?;
    let fetcher = Fetcher::new(&config).context("failed to build HTTP client")?;
    let orchestrator = Orchestrator::new(Arc::new(fetcher), config);

    let modes = args.modes();
    tracing::debug!(target_ref = %args.stac_file, ?modes, "validating");
    let results = orchestrator.run(&args.stac_file, &modes);

    println!("{}", report(&results).context("failed to serialize report")?);
    Ok(if all_valid(&results) { 0 } else { 1 })
}
