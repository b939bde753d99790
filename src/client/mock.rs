//! Mock API clients for testing
//!
//! Provide in-memory implementations of the client traits for unit testing
//! without making real API calls.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use super::models::{Project, SyncStatus, UserEntitlement, WebApiTeam};
use super::{AzureDevOpsApi, GitHubApi};
use crate::error::{ApiError, Result};

/// Mock GitHub client.
///
/// Configure responses via builder methods, then hand it to the pipeline.
///
/// # Example
/// ```ignore
/// let mock = MockGitHubClient::new()
///     .with_repos(vec![json!({"name": "api"})])
///     .await;
///
/// let repos = mock.get_organization_repos("acme").await?;
/// assert_eq!(repos.len(), 1);
/// ```
#[derive(Default)]
pub struct MockGitHubClient {
    /// Organization payload returned from get_organization_details
    organization: Arc<Mutex<Option<Value>>>,
    /// Repositories returned from get_organization_repos
    repos: Arc<Mutex<Vec<Value>>>,
    /// Members returned from get_organization_members
    members: Arc<Mutex<Vec<Value>>>,
    /// Teams returned from get_organization_teams
    teams: Arc<Mutex<Vec<Value>>>,
    /// Per-repository teams, keyed by repository name
    repo_teams: Arc<Mutex<HashMap<String, Vec<Value>>>>,
    /// Per-repository collaborators, keyed by repository name
    repo_collaborators: Arc<Mutex<HashMap<String, Vec<Value>>>>,
    /// Error returned from get_organization_repos (consumed on first use)
    repos_error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<GitHubCallCounts>>,
    /// Order in which operations were invoked
    call_log: Arc<Mutex<Vec<String>>>,
}

/// Tracks GitHub API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct GitHubCallCounts {
    pub get_authenticated_user: usize,
    pub get_organization_details: usize,
    pub get_organization_repos: usize,
    pub get_organization_members: usize,
    pub get_organization_teams: usize,
    pub get_repo_teams: usize,
    pub get_repo_collaborators: usize,
}

impl MockGitHubClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the organization payload.
    pub async fn with_organization(self, organization: Value) -> Self {
        *self.organization.lock().await = Some(organization);
        self
    }

    /// Configure repositories to return from get_organization_repos.
    pub async fn with_repos(self, repos: Vec<Value>) -> Self {
        *self.repos.lock().await = repos;
        self
    }

    /// Configure members to return from get_organization_members.
    pub async fn with_members(self, members: Vec<Value>) -> Self {
        *self.members.lock().await = members;
        self
    }

    /// Configure teams to return from get_organization_teams.
    pub async fn with_teams(self, teams: Vec<Value>) -> Self {
        *self.teams.lock().await = teams;
        self
    }

    /// Configure teams with access to one repository.
    pub async fn with_repo_teams(self, repo: &str, teams: Vec<Value>) -> Self {
        self.repo_teams.lock().await.insert(repo.to_string(), teams);
        self
    }

    /// Configure collaborators of one repository.
    pub async fn with_repo_collaborators(self, repo: &str, collaborators: Vec<Value>) -> Self {
        self.repo_collaborators
            .lock()
            .await
            .insert(repo.to_string(), collaborators);
        self
    }

    /// Make the next repository listing fail.
    pub async fn with_repos_error(self, error: ApiError) -> Self {
        *self.repos_error.lock().await = Some(error);
        self
    }

    /// Get call counts for verification.
    pub async fn call_counts(&self) -> GitHubCallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get the ordered list of invoked operations.
    pub async fn call_log(&self) -> Vec<String> {
        self.call_log.lock().await.clone()
    }

    async fn record(&self, call: &str) {
        self.call_log.lock().await.push(call.to_string());
    }
}

#[async_trait]
impl GitHubApi for MockGitHubClient {
    async fn get_authenticated_user(&self) -> Result<Value> {
        self.call_count.lock().await.get_authenticated_user += 1;
        self.record("get_authenticated_user").await;
        Ok(json!({ "login": "mock-user" }))
    }

    async fn get_organization_details(&self, org: &str) -> Result<Value> {
        self.call_count.lock().await.get_organization_details += 1;
        self.record("get_organization_details").await;
        Ok(self
            .organization
            .lock()
            .await
            .clone()
            .unwrap_or_else(|| json!({ "login": org, "name": org })))
    }

    async fn get_organization_repos(&self, _org: &str) -> Result<Vec<Value>> {
        self.call_count.lock().await.get_organization_repos += 1;
        self.record("get_organization_repos").await;
        if let Some(err) = self.repos_error.lock().await.take() {
            return Err(err.into());
        }
        Ok(self.repos.lock().await.clone())
    }

    async fn get_organization_members(&self, _org: &str) -> Result<Vec<Value>> {
        self.call_count.lock().await.get_organization_members += 1;
        self.record("get_organization_members").await;
        Ok(self.members.lock().await.clone())
    }

    async fn get_organization_teams(&self, _org: &str) -> Result<Vec<Value>> {
        self.call_count.lock().await.get_organization_teams += 1;
        self.record("get_organization_teams").await;
        Ok(self.teams.lock().await.clone())
    }

    async fn get_repo_teams(&self, _org: &str, repo: &str) -> Vec<Value> {
        self.call_count.lock().await.get_repo_teams += 1;
        self.record(&format!("get_repo_teams:{}", repo)).await;
        self.repo_teams
            .lock()
            .await
            .get(repo)
            .cloned()
            .unwrap_or_default()
    }

    async fn get_repo_collaborators(&self, _org: &str, repo: &str) -> Vec<Value> {
        self.call_count.lock().await.get_repo_collaborators += 1;
        self.record(&format!("get_repo_collaborators:{}", repo)).await;
        self.repo_collaborators
            .lock()
            .await
            .get(repo)
            .cloned()
            .unwrap_or_default()
    }
}

/// A captured permission sync request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedSync {
    pub project: String,
    pub repo: String,
    pub team_count: usize,
    pub collaborator_count: usize,
}

/// Mock Azure DevOps client.
#[derive(Default)]
pub struct MockAzureDevOpsClient {
    /// Projects returned from get_projects
    projects: Arc<Mutex<Vec<Project>>>,
    /// Teams returned from get_teams; create_team appends here
    teams: Arc<Mutex<Vec<WebApiTeam>>>,
    /// Users returned from get_users
    users: Arc<Mutex<Vec<UserEntitlement>>>,
    /// Repositories whose sync fails
    failing_syncs: Arc<Mutex<Vec<String>>>,
    /// Fail team creation
    create_error: Arc<Mutex<bool>>,
    /// Captured sync calls
    syncs: Arc<Mutex<Vec<CapturedSync>>>,
    /// Number of create_team calls
    creates: Arc<Mutex<usize>>,
}

impl MockAzureDevOpsClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure projects to return from get_projects.
    pub async fn with_projects(self, projects: Vec<Project>) -> Self {
        *self.projects.lock().await = projects;
        self
    }

    /// Configure existing teams.
    pub async fn with_teams(self, teams: Vec<WebApiTeam>) -> Self {
        *self.teams.lock().await = teams;
        self
    }

    /// Configure users to return from get_users.
    pub async fn with_users(self, users: Vec<UserEntitlement>) -> Self {
        *self.users.lock().await = users;
        self
    }

    /// Make syncing `repo` fail.
    pub async fn with_failing_sync(self, repo: &str) -> Self {
        self.failing_syncs.lock().await.push(repo.to_string());
        self
    }

    /// Make team creation fail.
    pub async fn with_create_error(self) -> Self {
        *self.create_error.lock().await = true;
        self
    }

    /// Get captured sync calls.
    pub async fn syncs(&self) -> Vec<CapturedSync> {
        self.syncs.lock().await.clone()
    }

    /// Get the number of create_team calls.
    pub async fn create_count(&self) -> usize {
        *self.creates.lock().await
    }
}

#[async_trait]
impl AzureDevOpsApi for MockAzureDevOpsClient {
    async fn get_projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects.lock().await.clone())
    }

    async fn get_teams(&self, _project: &str) -> Vec<WebApiTeam> {
        self.teams.lock().await.clone()
    }

    async fn get_users(&self) -> Vec<UserEntitlement> {
        self.users.lock().await.clone()
    }

    async fn create_team(
        &self,
        project: &str,
        name: &str,
        description: &str,
    ) -> Result<WebApiTeam> {
        *self.creates.lock().await += 1;
        if *self.create_error.lock().await {
            return Err(ApiError::BadRequest(format!("cannot create {}", name)).into());
        }

        let mut teams = self.teams.lock().await;
        let team = WebApiTeam {
            id: format!("team-{}", teams.len() + 1),
            name: name.to_string(),
            description: Some(description.to_string()),
            project_name: Some(project.to_string()),
        };
        teams.push(team.clone());
        Ok(team)
    }

    async fn sync_repository_permissions(
        &self,
        project: &str,
        repo: &str,
        teams: &[Value],
        collaborators: &[Value],
    ) -> Result<SyncStatus> {
        self.syncs.lock().await.push(CapturedSync {
            project: project.to_string(),
            repo: repo.to_string(),
            team_count: teams.len(),
            collaborator_count: collaborators.len(),
        });

        if self.failing_syncs.lock().await.iter().any(|r| r == repo) {
            return Err(ApiError::ServerError(format!("sync failed for {}", repo)).into());
        }

        Ok(SyncStatus::Unsupported {
            repository: repo.to_string(),
            team_count: teams.len(),
            collaborator_count: collaborators.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_github_counts_calls() {
        let mock = MockGitHubClient::new()
            .with_repos(vec![json!({"name": "api"})])
            .await;

        let repos = mock.get_organization_repos("acme").await.unwrap();
        assert_eq!(repos.len(), 1);

        let counts = mock.call_counts().await;
        assert_eq!(counts.get_organization_repos, 1);
        assert_eq!(counts.get_repo_teams, 0);
    }

    #[tokio::test]
    async fn test_mock_github_repos_error_is_consumed() {
        let mock = MockGitHubClient::new()
            .with_repos_error(ApiError::ServerError("down".into()))
            .await;

        assert!(mock.get_organization_repos("acme").await.is_err());
        assert!(mock.get_organization_repos("acme").await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_azure_create_or_update_is_idempotent() {
        let mock = MockAzureDevOpsClient::new();

        let first = mock
            .create_or_update_team("Platform", "Reviewers", "")
            .await
            .unwrap();
        let second = mock
            .create_or_update_team("Platform", "Reviewers", "")
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(mock.create_count().await, 1);
    }

    #[tokio::test]
    async fn test_mock_azure_create_failure_yields_none() {
        let mock = MockAzureDevOpsClient::new().with_create_error().await;

        let team = mock.create_or_update_team("Platform", "Reviewers", "").await;
        assert!(team.is_none());
        assert_eq!(mock.create_count().await, 1);
    }
}
