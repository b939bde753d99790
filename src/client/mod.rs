//! GitHub and Azure DevOps API clients
//!
//! Each external service is exposed as one trait with a real HTTP
//! implementation and, in tests, an in-memory mock:
//! - [`GitHubApi`] - organization, repository, member and team introspection
//! - [`AzureDevOpsApi`] - project/team/user introspection and permission sync

use async_trait::async_trait;
use log::{error, warn};
use serde_json::Value;

use crate::error::Result;

pub mod azure;
pub mod github;
mod http;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;

pub use azure::AzureDevOpsClient;
pub use github::GitHubClient;
#[cfg(test)]
pub use mock::{MockAzureDevOpsClient, MockGitHubClient};
pub use models::{Project, SyncStatus, UserEntitlement, WebApiTeam};

/// GitHub REST operations needed for organization introspection.
///
/// Payloads are returned as raw JSON; normalization happens in the report
/// layer.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Get the user the token authenticates as
    async fn get_authenticated_user(&self) -> Result<Value>;

    /// Get organization metadata
    async fn get_organization_details(&self, org: &str) -> Result<Value>;

    /// List organization repositories, capped at the repository page ceiling
    async fn get_organization_repos(&self, org: &str) -> Result<Vec<Value>>;

    /// List all organization members
    async fn get_organization_members(&self, org: &str) -> Result<Vec<Value>>;

    /// List all organization teams
    async fn get_organization_teams(&self, org: &str) -> Result<Vec<Value>>;

    /// List teams with access to a repository.
    ///
    /// Best-effort: failures are logged and yield an empty list.
    async fn get_repo_teams(&self, org: &str, repo: &str) -> Vec<Value>;

    /// List collaborators of a repository.
    ///
    /// Best-effort: failures are logged and yield an empty list.
    async fn get_repo_collaborators(&self, org: &str, repo: &str) -> Vec<Value>;
}

/// Azure DevOps REST operations.
#[async_trait]
pub trait AzureDevOpsApi: Send + Sync {
    /// List projects in the organization
    async fn get_projects(&self) -> Result<Vec<Project>>;

    /// List teams in a project. Best-effort.
    async fn get_teams(&self, project: &str) -> Vec<WebApiTeam>;

    /// List user entitlements in the organization. Best-effort.
    async fn get_users(&self) -> Vec<UserEntitlement>;

    /// Create a team in a project
    #[allow(dead_code)]
    async fn create_team(&self, project: &str, name: &str, description: &str)
    -> Result<WebApiTeam>;

    /// Mirror a repository's GitHub teams and collaborators into Azure DevOps.
    async fn sync_repository_permissions(
        &self,
        project: &str,
        repo: &str,
        teams: &[Value],
        collaborators: &[Value],
    ) -> Result<SyncStatus>;

    /// Return the team named `name`, creating it if the project has none.
    ///
    /// Failures are logged and yield `None`.
    #[allow(dead_code)]
    async fn create_or_update_team(
        &self,
        project: &str,
        name: &str,
        description: &str,
    ) -> Option<WebApiTeam> {
        let existing = self.get_teams(project).await;
        if let Some(team) = existing.into_iter().find(|team| team.name == name) {
            return Some(team);
        }

        match self.create_team(project, name, description).await {
            Ok(team) => Some(team),
            Err(err) => {
                error!("Could not create team {} in {}: {}", name, project, err);
                None
            }
        }
    }
}

/// Log a best-effort failure and substitute an empty list.
pub(crate) fn best_effort<T>(result: Result<Vec<T>>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|err| {
        warn!("Could not fetch {}: {}", what, err);
        Vec::new()
    })
}
