use async_trait::async_trait;
use futures::future::join_all;

use crate::error::{ActiveReposError, Result};
use crate::types::{RepoEntry, RepositorySummary};

/// Anything that can look up one repository by `owner/name`.
#[async_trait]
pub trait RepoSource: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    async fn fetch_repo(&self, full_name: &str) -> Result<RepositorySummary>;
}

/// Derive `owner/name` from a URL shaped like `https://host/<owner>/<name>/...`.
/// Owner and name must be the 4th and 5th `/`-separated segments.
pub fn full_name_from_url(url: &str) -> Result<String> {
    let segments: Vec<&str> = url.split('/').collect();
    match (segments.get(3), segments.get(4)) {
        (Some(owner), Some(name)) if !owner.is_empty() && !name.is_empty() => {
            Ok(format!("{}/{}", owner, name))
        }
        _ => Err(ActiveReposError::Config(format!(
            "cannot derive owner/name from repository URL '{}'",
            url
        ))),
    }
}

/// Fetch every configured repository concurrently and wait for all of them.
/// The result has one entry per URL, in input order.
pub async fn load_entries(source: &dyn RepoSource, urls: &[String]) -> Vec<RepoEntry> {
    let fetches = urls.iter().map(|url| async move {
        let full_name = match full_name_from_url(url) {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(url = %url, "skipping malformed repository URL");
                return RepoEntry::Failed {
                    source: url.clone(),
                    reason: e.to_string(),
                };
            }
        };

        match source.fetch_repo(&full_name).await {
            Ok(summary) => RepoEntry::Loaded(summary),
            Err(e) => {
                tracing::warn!(repo = %full_name, error = %e, "failed to load repository");
                RepoEntry::Failed {
                    source: full_name,
                    reason: e.to_string(),
                }
            }
        }
    });

    let entries = join_all(fetches).await;
    tracing::debug!(
        source = source.name(),
        total = entries.len(),
        failed = entries.iter().filter(|e| e.is_failed()).count(),
        "repositories loaded"
    );
    entries
}
