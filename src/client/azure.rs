//! Azure DevOps REST API client

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use log::{debug, info};
use reqwest::{Client as HttpClient, Url};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;

use super::http::{decode_response, endpoint, parse_base_url};
use super::models::{
    CreateTeamRequest, ListEnvelope, Project, SyncStatus, UserEntitlement, WebApiTeam,
};
use super::{AzureDevOpsApi, best_effort};
use crate::config::{AZURE_DEVOPS_URL_VAR, AzureDevOpsConfig};
use crate::error::{ApiError, ConfigError, Result};

/// REST API version sent with every request
pub const API_VERSION: &str = "6.0";

/// Build the Basic authorization value for a PAT (empty user name).
fn basic_auth(token: &str) -> String {
    let encoded = general_purpose::STANDARD.encode(format!(":{}", token));
    format!("Basic {}", encoded)
}

/// Azure DevOps API client
pub struct AzureDevOpsClient {
    http: HttpClient,
    /// Base URL with the organization segment appended
    org_url: Url,
}

impl AzureDevOpsClient {
    /// Create a new Azure DevOps client.
    ///
    /// Fails if the token or organization is blank or the base URL is
    /// malformed.
    pub fn new(config: &AzureDevOpsConfig) -> Result<Self> {
        config.validate()?;
        let base_url = parse_base_url(&config.base_url, AZURE_DEVOPS_URL_VAR)?;
        let org_url = endpoint(&base_url, &[config.organization.as_str()]);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&basic_auth(&config.token)).map_err(|_| {
                ConfigError::Invalid("AZURE_DEVOPS_TOKEN is not a valid header value".into())
            })?,
        );

        let http = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { http, org_url })
    }

    async fn get_list<T: serde::de::DeserializeOwned>(&self, path: &[&str]) -> Result<Vec<T>> {
        let url = endpoint(&self.org_url, path);
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .query(&[("api-version", API_VERSION)])
            .send()
            .await
            .map_err(ApiError::from)?;
        let envelope: ListEnvelope<T> = decode_response(response).await?;
        Ok(envelope.value)
    }
}

#[async_trait]
impl AzureDevOpsApi for AzureDevOpsClient {
    async fn get_projects(&self) -> Result<Vec<Project>> {
        self.get_list(&["_apis", "projects"]).await
    }

    async fn get_teams(&self, project: &str) -> Vec<WebApiTeam> {
        let result: Result<Vec<WebApiTeam>> =
            self.get_list(&["_apis", "projects", project, "teams"]).await;
        best_effort(result, &format!("Azure DevOps teams for {}", project))
    }

    async fn get_users(&self) -> Vec<UserEntitlement> {
        let result: Result<Vec<UserEntitlement>> =
            self.get_list(&["_apis", "userentitlements"]).await;
        best_effort(result, "Azure DevOps users")
    }

    async fn create_team(
        &self,
        project: &str,
        name: &str,
        description: &str,
    ) -> Result<WebApiTeam> {
        let url = endpoint(&self.org_url, &["_apis", "projects", project, "teams"]);
        debug!("POST {}", url);

        let body = CreateTeamRequest {
            name: name.to_string(),
            description: description.to_string(),
        };
        let response = self
            .http
            .post(url)
            .query(&[("api-version", API_VERSION)])
            .json(&body)
            .send()
            .await
            .map_err(ApiError::from)?;
        let team: WebApiTeam = decode_response(response).await?;

        info!("Created Azure DevOps team {} in {}", team.name, project);
        Ok(team)
    }

    async fn sync_repository_permissions(
        &self,
        project: &str,
        repo: &str,
        teams: &[Value],
        collaborators: &[Value],
    ) -> Result<SyncStatus> {
        info!(
            "Sync of {} into {}: {} teams, {} collaborators not written (no grant mapping)",
            repo,
            project,
            teams.len(),
            collaborators.len()
        );

        Ok(SyncStatus::Unsupported {
            repository: repo.to_string(),
            team_count: teams.len(),
            collaborator_count: collaborators.len(),
        })
    }
}
