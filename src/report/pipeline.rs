//! Report-assembly pipeline: fetch → normalize → aggregate → persist

use std::path::PathBuf;

use chrono::Utc;
use log::{debug, info, warn};

use super::repository::format_repository_info;
use super::summary::create_summary_report;
use super::{
    AnalysisDocument, AnalysisMetadata, SummaryDocument, SyncTally, detailed_filename,
    summary_filename,
};
use crate::client::{AzureDevOpsApi, GitHubApi, SyncStatus};
use crate::error::Result;
use crate::output::json::save_to_json;

/// Run parameters
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// GitHub organization to analyze
    pub org: String,
    /// Azure DevOps project to mirror into; `None` disables syncing
    pub azure_project: Option<String>,
    /// Directory the reports are written to
    pub output_dir: PathBuf,
}

/// Result of a completed run
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub analysis: AnalysisDocument,
    pub summary: SummaryDocument,
    pub detailed_path: PathBuf,
    pub summary_path: PathBuf,
}

/// Run the full pipeline for one organization.
///
/// Syncing happens only when both an Azure client and a project are given.
/// Errors on the critical path abort the run before anything is written.
pub async fn run_analysis(
    github: &dyn GitHubApi,
    azure: Option<&dyn AzureDevOpsApi>,
    options: &AnalysisOptions,
) -> Result<AnalysisOutcome> {
    let org = options.org.as_str();
    let started_at = Utc::now().to_rfc3339();

    info!("Fetching organization details for {}", org);
    let organization = github.get_organization_details(org).await?;

    info!("Fetching repositories for {}", org);
    let raw_repos = github.get_organization_repos(org).await?;
    info!("Found {} repositories", raw_repos.len());

    let members = github.get_organization_members(org).await?;
    info!("Found {} members", members.len());

    let teams = github.get_organization_teams(org).await?;
    info!("Found {} teams", teams.len());

    let sync_target = match (azure, options.azure_project.as_deref()) {
        (Some(client), Some(project)) => Some((client, project)),
        _ => None,
    };

    let mut tally = SyncTally::default();
    let mut repositories = Vec::with_capacity(raw_repos.len());

    for raw in &raw_repos {
        let name = raw.get("name").and_then(|n| n.as_str()).unwrap_or_default();
        debug!("Processing repository {}", name);

        let repo_teams = github.get_repo_teams(org, name).await;
        let collaborators = github.get_repo_collaborators(org, name).await;

        if let Some((client, project)) = sync_target {
            tally.attempted += 1;
            match client
                .sync_repository_permissions(project, name, &repo_teams, &collaborators)
                .await
            {
                Ok(SyncStatus::Unsupported { .. }) => tally.unsupported += 1,
                Err(err) => {
                    warn!("Permission sync failed for {}: {}", name, err);
                    tally.failed += 1;
                }
            }
        }

        repositories.push(format_repository_info(raw, repo_teams, collaborators));
    }

    if tally.unsupported > 0 {
        warn!(
            "Azure DevOps permission sync is not supported yet; {} repositories were not mirrored",
            tally.unsupported
        );
    }

    let analysis = AnalysisDocument {
        metadata: AnalysisMetadata {
            analysis_timestamp: started_at,
            organization_name: org.to_string(),
            total_repositories: repositories.len(),
            total_members: members.len(),
            total_teams: teams.len(),
            azure_project: options.azure_project.clone(),
            azure_sync: tally,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        },
        organization,
        repositories,
        members,
        teams,
    };
    let detailed_path = save_to_json(&analysis, &detailed_filename(org), &options.output_dir)?;
    info!("Wrote {}", detailed_path.display());

    let summary = create_summary_report(&analysis);
    let summary_path = save_to_json(&summary, &summary_filename(org), &options.output_dir)?;
    info!("Wrote {}", summary_path.display());

    Ok(AnalysisOutcome {
        analysis,
        summary,
        detailed_path,
        summary_path,
    })
}
