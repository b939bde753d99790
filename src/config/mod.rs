//! Client configuration
//!
//! Credentials and endpoints are read from the environment once, at the edge,
//! and handed to the clients as plain structs. Tests build these structs
//! directly instead of mutating the process environment.

use std::env;

use crate::error::{ConfigError, Result};

/// Default GitHub REST API base URL
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Default Azure DevOps base URL (the organization is appended)
pub const DEFAULT_AZURE_DEVOPS_URL: &str = "https://dev.azure.com";

pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const GITHUB_API_URL_VAR: &str = "GITHUB_API_URL";
pub const AZURE_DEVOPS_TOKEN_VAR: &str = "AZURE_DEVOPS_TOKEN";
pub const AZURE_DEVOPS_ORG_VAR: &str = "AZURE_DEVOPS_ORG";
pub const AZURE_DEVOPS_URL_VAR: &str = "AZURE_DEVOPS_URL";

/// GitHub client configuration
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Personal access token
    pub token: String,

    /// REST API base URL, without trailing slash
    pub api_url: String,
}

impl GitHubConfig {
    /// Create a configuration for the public GitHub API
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: DEFAULT_GITHUB_API_URL.to_string(),
        }
    }

    /// Override the API base URL (GitHub Enterprise or a test server)
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = trim_base_url(url.into());
        self
    }

    /// Load from `GITHUB_TOKEN` and the optional `GITHUB_API_URL`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = require(&lookup, GITHUB_TOKEN_VAR)?;
        let config = Self::new(token);

        Ok(match optional(&lookup, GITHUB_API_URL_VAR) {
            Some(url) => config.with_api_url(url),
            None => config,
        })
    }

    /// Fail if the token is blank
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingEnv(GITHUB_TOKEN_VAR).into());
        }
        Ok(())
    }
}

/// Azure DevOps client configuration
#[derive(Debug, Clone)]
pub struct AzureDevOpsConfig {
    /// Personal access token
    pub token: String,

    /// Azure DevOps organization name
    pub organization: String,

    /// Service base URL, without trailing slash or organization
    pub base_url: String,
}

impl AzureDevOpsConfig {
    /// Create a configuration for the hosted Azure DevOps service
    pub fn new(token: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            organization: organization.into(),
            base_url: DEFAULT_AZURE_DEVOPS_URL.to_string(),
        }
    }

    /// Override the service base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = trim_base_url(url.into());
        self
    }

    /// Load from `AZURE_DEVOPS_TOKEN`, `AZURE_DEVOPS_ORG` and the optional `AZURE_DEVOPS_URL`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = require(&lookup, AZURE_DEVOPS_TOKEN_VAR)?;
        let organization = require(&lookup, AZURE_DEVOPS_ORG_VAR)?;
        let config = Self::new(token, organization);

        Ok(match optional(&lookup, AZURE_DEVOPS_URL_VAR) {
            Some(url) => config.with_base_url(url),
            None => config,
        })
    }

    /// Fail if the token or organization is blank
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingEnv(AZURE_DEVOPS_TOKEN_VAR).into());
        }
        if self.organization.trim().is_empty() {
            return Err(ConfigError::MissingEnv(AZURE_DEVOPS_ORG_VAR).into());
        }
        Ok(())
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<String> {
    optional(lookup, key).ok_or_else(|| ConfigError::MissingEnv(key).into())
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

fn trim_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
