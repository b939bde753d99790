//! Summary statistics over an analysis document

use chrono::Utc;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use super::repository::RepositoryRecord;
use super::{AnalysisDocument, OrganizationOverview, SummaryDocument, SummaryStats};
use crate::output::formatters::format_size;

/// Reported as the most popular language when no repository has one
pub const NO_LANGUAGE: &str = "None";

/// Language → repository count, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageHistogram(Vec<(String, usize)>);

impl LanguageHistogram {
    /// Count languages across records, skipping records with no language.
    pub fn from_records(records: &[RepositoryRecord]) -> Self {
        let mut histogram = Self::default();
        for language in records.iter().filter_map(|r| r.language.as_deref()) {
            histogram.add(language);
        }
        histogram
    }

    fn add(&mut self, language: &str) {
        match self.0.iter_mut().find(|(name, _)| name == language) {
            Some((_, count)) => *count += 1,
            None => self.0.push((language.to_string(), 1)),
        }
    }

    /// Count for one language
    #[allow(dead_code)]
    pub fn get(&self, language: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, count)| *count)
    }

    /// Entries in first-seen order
    pub fn entries(&self) -> &[(String, usize)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Highest count; ties go to the language seen first.
    pub fn most_popular(&self) -> Option<&str> {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.0 {
            if best.is_none_or(|b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(name, _)| name.as_str())
    }
}

impl Serialize for LanguageHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (language, count) in &self.0 {
            map.serialize_entry(language, count)?;
        }
        map.end()
    }
}

/// Derive the summary document from an analysis document.
///
/// Deterministic apart from `generated_at`.
pub fn create_summary_report(analysis: &AnalysisDocument) -> SummaryDocument {
    SummaryDocument {
        organization: organization_overview(
            &analysis.organization,
            &analysis.metadata.organization_name,
        ),
        generated_at: Utc::now().to_rfc3339(),
        summary: summarize(&analysis.repositories),
    }
}

fn summarize(records: &[RepositoryRecord]) -> SummaryStats {
    let total_size_kb: u64 = records.iter().map(|r| r.size).sum();
    let private = records.iter().filter(|r| r.private).count();
    let languages = LanguageHistogram::from_records(records);
    let most_popular_language = languages.most_popular().unwrap_or(NO_LANGUAGE).to_string();

    SummaryStats {
        total_repositories: records.len(),
        total_size_kb,
        total_size_formatted: format_size(total_size_kb),
        public_repositories: records.len() - private,
        private_repositories: private,
        archived_repositories: records.iter().filter(|r| r.archived).count(),
        forked_repositories: records.iter().filter(|r| r.fork).count(),
        languages,
        most_popular_language,
    }
}

fn organization_overview(snapshot: &Value, fallback_name: &str) -> OrganizationOverview {
    let name = snapshot
        .get("name")
        .and_then(Value::as_str)
        .or_else(|| snapshot.get("login").and_then(Value::as_str))
        .unwrap_or(fallback_name)
        .to_string();

    OrganizationOverview {
        name,
        description: snapshot
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        public_repos: snapshot.get("public_repos").and_then(Value::as_u64).unwrap_or(0),
        total_private_repos: snapshot
            .get("total_private_repos")
            .and_then(Value::as_u64)
            .unwrap_or(0),
    }
}
