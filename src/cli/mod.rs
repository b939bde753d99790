//! CLI definition and command handlers

use std::path::PathBuf;

use clap::Parser;

pub mod analyze;
pub mod preflight;

/// orgscan - GitHub organization inventory reporter
#[derive(Parser, Debug)]
#[command(name = "orgscan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// GitHub organization name
    #[arg(long)]
    pub org: String,

    /// Azure DevOps project to mirror permissions into (enables the Azure client)
    #[arg(long)]
    pub azure_project: Option<String>,

    /// Directory the JSON reports are written to
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Check API connectivity before running the analysis
    #[arg(long)]
    pub preflight: bool,

    /// Enable debug logging
    #[arg(long, env = "ORGSCAN_DEBUG", hide_env = true)]
    pub debug: bool,
}

impl Cli {
    /// Azure project, ignoring blank values
    pub fn azure_project(&self) -> Option<&str> {
        self.azure_project
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}
