//! Report documents and the assembly pipeline
//!
//! Raw API payloads flow one way through this module: repository payloads
//! are normalized into [`RepositoryRecord`]s, gathered into an
//! [`AnalysisDocument`], and reduced into a [`SummaryDocument`].

use serde::Serialize;
use serde_json::Value;

pub mod pipeline;
pub mod repository;
pub mod summary;

pub use pipeline::{AnalysisOptions, AnalysisOutcome, run_analysis};
pub use repository::RepositoryRecord;
pub use summary::LanguageHistogram;

/// Everything collected about an organization in one run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisDocument {
    /// Raw organization payload
    pub organization: Value,

    /// Normalized repositories, in listing order
    pub repositories: Vec<RepositoryRecord>,

    /// Raw member payloads
    pub members: Vec<Value>,

    /// Raw team payloads
    pub teams: Vec<Value>,

    /// Run metadata
    pub metadata: AnalysisMetadata,
}

/// Run metadata attached to the analysis document
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    /// When the run started (RFC 3339)
    pub analysis_timestamp: String,
    pub organization_name: String,
    pub total_repositories: usize,
    pub total_members: usize,
    pub total_teams: usize,
    /// Azure DevOps project the run mirrored into, if any
    pub azure_project: Option<String>,
    pub azure_sync: SyncTally,
    pub tool_version: String,
}

/// Per-run counts of Azure DevOps permission sync outcomes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncTally {
    pub attempted: usize,
    pub unsupported: usize,
    pub failed: usize,
}

/// Aggregate statistics derived from an analysis document.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryDocument {
    pub organization: OrganizationOverview,
    pub generated_at: String,
    pub summary: SummaryStats,
}

/// Organization facts carried into the summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationOverview {
    pub name: String,
    pub description: Option<String>,
    pub public_repos: u64,
    pub total_private_repos: u64,
}

/// Repository statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_repositories: usize,
    pub total_size_kb: u64,
    pub total_size_formatted: String,
    pub public_repositories: usize,
    pub private_repositories: usize,
    pub archived_repositories: usize,
    pub forked_repositories: usize,
    pub languages: LanguageHistogram,
    pub most_popular_language: String,
}

/// File name of the detailed analysis for `org`
pub fn detailed_filename(org: &str) -> String {
    format!("{}_detailed_analysis.json", org)
}

/// File name of the summary for `org`
pub fn summary_filename(org: &str) -> String {
    format!("{}_summary.json", org)
}
