//! GitHub REST API client

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, Url};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use super::http::{decode_response, endpoint, parse_base_url};
use super::pagination::{
    GITHUB_PAGE_SIZE, MAX_REPO_PAGES, PageLimit, PaginationParams, collect_pages,
};
use super::{GitHubApi, best_effort};
use crate::config::{GITHUB_API_URL_VAR, GitHubConfig};
use crate::error::{ApiError, ConfigError, Result};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// GitHub API client
pub struct GitHubClient {
    http: HttpClient,
    api_url: Url,
}

impl GitHubClient {
    /// Create a new GitHub API client.
    ///
    /// Fails if the configured token is blank or the API URL is malformed.
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        config.validate()?;
        let api_url = parse_base_url(&config.api_url, GITHUB_API_URL_VAR)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("token {}", config.token)).map_err(|_| {
                ConfigError::Invalid("GITHUB_TOKEN is not a valid header value".into())
            })?,
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("orgscan/", env!("CARGO_PKG_VERSION"))),
        );

        let http = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { http, api_url })
    }

    /// GET a single resource
    async fn get<T: serde::de::DeserializeOwned>(&self, path: &[&str]) -> Result<T> {
        let url = endpoint(&self.api_url, path);
        debug!("GET {}", url);

        let response = self.http.get(url).send().await.map_err(ApiError::from)?;
        decode_response(response).await
    }

    /// GET one page of a listing
    async fn get_page(
        &self,
        path: &[&str],
        extra: &[(&'static str, &'static str)],
        params: PaginationParams,
    ) -> Result<Vec<Value>> {
        let url = endpoint(&self.api_url, path);
        debug!("GET {} (page {})", url, params.page);

        let response = self
            .http
            .get(url)
            .query(extra)
            .query(&params.to_query_params())
            .send()
            .await
            .map_err(ApiError::from)?;
        decode_response(response).await
    }

    /// Collect every page of a listing up to `limit`
    async fn get_all(
        &self,
        path: &[&str],
        extra: &[(&'static str, &'static str)],
        limit: PageLimit,
    ) -> Result<Vec<Value>> {
        collect_pages(limit, |params| self.get_page(path, extra, params)).await
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_authenticated_user(&self) -> Result<Value> {
        self.get(&["user"]).await
    }

    async fn get_organization_details(&self, org: &str) -> Result<Value> {
        self.get(&["orgs", org]).await
    }

    async fn get_organization_repos(&self, org: &str) -> Result<Vec<Value>> {
        self.get_all(
            &["orgs", org, "repos"],
            &[("type", "all"), ("sort", "name")],
            PageLimit::capped(GITHUB_PAGE_SIZE, MAX_REPO_PAGES),
        )
        .await
    }

    async fn get_organization_members(&self, org: &str) -> Result<Vec<Value>> {
        self.get_all(
            &["orgs", org, "members"],
            &[],
            PageLimit::unbounded(GITHUB_PAGE_SIZE),
        )
        .await
    }

    async fn get_organization_teams(&self, org: &str) -> Result<Vec<Value>> {
        self.get_all(
            &["orgs", org, "teams"],
            &[],
            PageLimit::unbounded(GITHUB_PAGE_SIZE),
        )
        .await
    }

    async fn get_repo_teams(&self, org: &str, repo: &str) -> Vec<Value> {
        let result: Result<Vec<Value>> = self.get(&["repos", org, repo, "teams"]).await;
        best_effort(result, &format!("teams for {}", repo))
    }

    async fn get_repo_collaborators(&self, org: &str, repo: &str) -> Vec<Value> {
        let result: Result<Vec<Value>> =
            self.get(&["repos", org, repo, "collaborators"]).await;
        best_effort(result, &format!("collaborators for {}", repo))
    }
}
