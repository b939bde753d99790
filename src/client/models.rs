//! Azure DevOps data models
//!
//! GitHub payloads are carried as raw `serde_json::Value`s and never modelled
//! here; only the Azure DevOps shapes the client reasons about are typed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Azure DevOps project reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project ID
    #[serde(default)]
    pub id: String,

    /// Project name
    pub name: String,

    /// Project description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Project state (wellFormed, createPending, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Azure DevOps team (WebApiTeam)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebApiTeam {
    /// Team ID
    #[serde(default)]
    pub id: String,

    /// Team name
    pub name: String,

    /// Team description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Owning project name (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}

/// Request body for creating a team
#[derive(Debug, Clone, Serialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub description: String,
}

/// Azure DevOps collection envelope.
///
/// Most endpoints wrap lists in `value`; user entitlements answer with
/// `members` on newer API versions.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ListEnvelope<T> {
    #[serde(default = "Vec::new", alias = "members")]
    pub value: Vec<T>,
}

/// Raw user entitlement record, passed through unmodified
pub type UserEntitlement = Value;

/// Outcome of mirroring one repository's permissions into Azure DevOps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncStatus {
    /// No mapping from GitHub roles to Azure DevOps grants exists yet;
    /// nothing was written
    Unsupported {
        repository: String,
        team_count: usize,
        collaborator_count: usize,
    },
}
