//! Connectivity checks run before an analysis

use colored::Colorize;
use serde_json::Value;

use crate::client::{AzureDevOpsApi, GitHubApi};
use crate::error::Result;

/// What the preflight learned about each service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightReport {
    /// Login the GitHub token authenticates as
    pub github_login: String,
    /// Azure DevOps view, when the Azure client is in use
    pub azure: Option<AzurePreflight>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzurePreflight {
    pub project: String,
    pub project_count: usize,
    /// Whether `project` is among the listed projects
    pub project_found: bool,
    pub team_count: usize,
    pub user_count: usize,
}

/// Verify both tokens work.
///
/// Failing to authenticate or to list projects aborts the run; the team and
/// user counts are best-effort.
pub async fn check(
    github: &dyn GitHubApi,
    azure: Option<(&dyn AzureDevOpsApi, &str)>,
) -> Result<PreflightReport> {
    let user = github.get_authenticated_user().await?;
    let github_login = user
        .get("login")
        .and_then(Value::as_str)
        .unwrap_or("Unknown")
        .to_string();

    let azure = match azure {
        Some((client, project)) => {
            let projects = client.get_projects().await?;
            Some(AzurePreflight {
                project: project.to_string(),
                project_count: projects.len(),
                project_found: projects.iter().any(|p| p.name.eq_ignore_ascii_case(project)),
                team_count: client.get_teams(project).await.len(),
                user_count: client.get_users().await.len(),
            })
        }
        None => None,
    };

    Ok(PreflightReport {
        github_login,
        azure,
    })
}

/// Print the preflight results
pub fn print(report: &PreflightReport) {
    println!(
        "{} GitHub connection successful (authenticated as {})",
        "✓".green(),
        report.github_login.cyan()
    );

    if let Some(azure) = &report.azure {
        println!(
            "{} Azure DevOps connection successful ({} projects, {} users)",
            "✓".green(),
            azure.project_count,
            azure.user_count
        );
        if azure.project_found {
            println!(
                "{} Project {} has {} teams",
                "✓".green(),
                azure.project.cyan(),
                azure.team_count
            );
        } else {
            println!(
                "{} Project {} not found in the organization",
                "⚠".yellow(),
                azure.project.cyan()
            );
        }
    }
}
