//! Analyze command: wire configuration, clients and the report pipeline

use log::info;

use crate::cli::{Cli, preflight};
use crate::client::{AzureDevOpsApi, AzureDevOpsClient, GitHubClient};
use crate::config::{AzureDevOpsConfig, GitHubConfig};
use crate::error::Result;
use crate::output::digest::print_digest;
use crate::report::{AnalysisOptions, run_analysis};

/// Run the analysis described by the command line
pub async fn run(cli: &Cli) -> Result<()> {
    let github = GitHubClient::new(&GitHubConfig::from_env()?)?;

    // The Azure client is only built, and its credentials only required,
    // when a project was requested.
    let azure = match cli.azure_project() {
        Some(project) => {
            info!("Azure DevOps project: {}", project);
            Some(AzureDevOpsClient::new(&AzureDevOpsConfig::from_env()?)?)
        }
        None => None,
    };
    let azure = azure.as_ref().map(|client| client as &dyn AzureDevOpsApi);

    if cli.preflight {
        let target = azure.zip(cli.azure_project());
        let report = preflight::check(&github, target).await?;
        preflight::print(&report);
    }

    let options = AnalysisOptions {
        org: cli.org.clone(),
        azure_project: cli.azure_project().map(str::to_string),
        output_dir: cli.output_dir.clone(),
    };

    println!("Analyzing {}...", options.org);
    let outcome = run_analysis(&github, azure, &options).await?;
    print_digest(&outcome);

    Ok(())
}
