use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized per-repository record shown as one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub full_name: String,
    pub updated_at: DateTime<Utc>,
    pub stars: u64,
    pub forks: u64,
    pub language: Option<String>,
    pub open_issues: u64,
    pub issues_url: String,
    pub html_url: String,
}

/// One slot of a load: either the fetched summary or the reason it is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RepoEntry {
    Loaded(RepositorySummary),
    Failed { source: String, reason: String },
}

impl RepoEntry {
    pub fn summary(&self) -> Option<&RepositorySummary> {
        match self {
            RepoEntry::Loaded(summary) => Some(summary),
            RepoEntry::Failed { .. } => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RepoEntry::Loaded(summary) => &summary.full_name,
            RepoEntry::Failed { source, .. } => source,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RepoEntry::Failed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortMode {
    #[default]
    BestMatch,
    MostStars,
    LeastStars,
    MostForks,
    LeastForks,
}

impl SortMode {
    /// Menu order.
    pub const ALL: [SortMode; 5] = [
        SortMode::BestMatch,
        SortMode::MostStars,
        SortMode::LeastStars,
        SortMode::MostForks,
        SortMode::LeastForks,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::BestMatch => "Best Match",
            SortMode::MostStars => "Most Stars",
            SortMode::LeastStars => "Least Stars",
            SortMode::MostForks => "Most Forks",
            SortMode::LeastForks => "Least Forks",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
