use chrono::{DateTime, Duration, Utc};

use crate::types::RepoEntry;

pub const DEFAULT_WINDOW_DAYS: u32 = 3;

/// True when `updated_at` lies within `window` of `now` in either direction.
/// The boundary itself counts as active.
pub fn is_active(updated_at: DateTime<Utc>, now: DateTime<Utc>, window: Duration) -> bool {
    let elapsed = now.signed_duration_since(updated_at);
    elapsed <= window && elapsed >= -window
}

/// Entries to render, in the given order. Failed entries carry no timestamp
/// and are always kept so the failure shows up as a card.
pub fn active_entries(entries: &[RepoEntry], now: DateTime<Utc>, window: Duration) -> Vec<RepoEntry> {
    entries
        .iter()
        .filter(|entry| match entry {
            RepoEntry::Loaded(summary) => is_active(summary.updated_at, now, window),
            RepoEntry::Failed { .. } => true,
        })
        .cloned()
        .collect()
}
