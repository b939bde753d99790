//! Console digest of a finished run

use colored::Colorize;
use tabled::Tabled;

use super::formatters::pluralize;
use super::table::format_table;
use crate::report::{AnalysisOutcome, SummaryDocument};

/// One language row in the digest table
#[derive(Tabled)]
struct LanguageRow {
    #[tabled(rename = "LANGUAGE")]
    language: String,
    #[tabled(rename = "REPOS")]
    repos: usize,
    #[tabled(rename = "SHARE")]
    share: String,
}

fn language_rows(summary: &SummaryDocument) -> Vec<LanguageRow> {
    let stats = &summary.summary;
    let total = stats.total_repositories.max(1) as f64;

    let mut rows: Vec<LanguageRow> = stats
        .languages
        .entries()
        .iter()
        .map(|(language, count)| LanguageRow {
            language: language.clone(),
            repos: *count,
            share: format!("{:.1}%", *count as f64 * 100.0 / total),
        })
        .collect();
    // Stable sort keeps first-seen order among equal counts
    rows.sort_by(|a, b| b.repos.cmp(&a.repos));
    rows
}

/// Render the digest as plain lines (colors applied when the terminal allows)
pub fn render_digest(outcome: &AnalysisOutcome) -> String {
    let summary = &outcome.summary;
    let stats = &summary.summary;
    let metadata = &outcome.analysis.metadata;

    let mut lines = vec![
        format!("{}", "Organization Analysis".bold()),
        String::new(),
        format!("Organization: {}", summary.organization.name.cyan()),
        format!(
            "Repositories: {} ({} public, {} private, {} archived, {} forks)",
            stats.total_repositories,
            stats.public_repositories,
            stats.private_repositories,
            stats.archived_repositories,
            stats.forked_repositories
        ),
        format!("Total size:   {}", stats.total_size_formatted),
        format!(
            "People:       {}, {}",
            pluralize(metadata.total_members, "member", "members"),
            pluralize(metadata.total_teams, "team", "teams")
        ),
        format!(
            "Languages:    {}",
            pluralize(stats.languages.len(), "language", "languages")
        ),
        format!("Top language: {}", stats.most_popular_language.green()),
    ];

    if let Some(project) = &metadata.azure_project {
        let sync = &metadata.azure_sync;
        let line = format!(
            "Azure DevOps: {} ({} attempted, {} unsupported, {} failed)",
            project, sync.attempted, sync.unsupported, sync.failed
        );
        lines.push(if sync.failed > 0 || sync.unsupported > 0 {
            format!("{} {}", "⚠".yellow(), line)
        } else {
            line
        });
    }

    lines.push(String::new());
    lines.push(format_table(&language_rows(summary), "No languages detected."));
    lines.push(String::new());
    lines.push(format!(
        "{} Reports written:\n  {}\n  {}",
        "✓".green(),
        outcome.detailed_path.display(),
        outcome.summary_path.display()
    ));

    lines.join("\n")
}

/// Print the digest to stdout
pub fn print_digest(outcome: &AnalysisOutcome) {
    println!("{}", render_digest(outcome));
}
