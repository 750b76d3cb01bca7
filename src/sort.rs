use std::cmp::Ordering;

use crate::types::{RepoEntry, RepositorySummary, SortMode};

/// Sort a copy of `entries` by `mode`. Always start from the unsorted load so
/// successive selections never compound.
pub fn sort_entries(entries: &[RepoEntry], mode: SortMode) -> Vec<RepoEntry> {
    let mut sorted = entries.to_vec();
    let key: fn(&RepositorySummary) -> u64 = match mode {
        SortMode::BestMatch => return sorted,
        SortMode::MostStars | SortMode::LeastStars => |s: &RepositorySummary| s.stars,
        SortMode::MostForks | SortMode::LeastForks => |s: &RepositorySummary| s.forks,
    };
    let descending = matches!(mode, SortMode::MostStars | SortMode::MostForks);

    sorted.sort_by(|a, b| match (a.summary(), b.summary()) {
        (Some(a), Some(b)) => {
            let ord = key(a).cmp(&key(b));
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
        // Failed entries have no counts; keep them after every loaded entry.
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn repo(name: &str, stars: u64, forks: u64) -> RepoEntry {
        RepoEntry::Loaded(RepositorySummary {
            full_name: name.to_string(),
            updated_at: Utc::now(),
            stars,
            forks,
            language: Some("Rust".to_string()),
            open_issues: 0,
            issues_url: format!("https://api.github.com/repos/{}/issues", name),
            html_url: format!("https://github.com/{}", name),
        })
    }

    fn sample() -> Vec<RepoEntry> {
        vec![
            repo("a/one", 10, 3),
            repo("a/two", 50, 1),
            RepoEntry::Failed {
                source: "x/broken".to_string(),
                reason: "404".to_string(),
            },
            repo("a/three", 5, 9),
            repo("a/four", 50, 0),
        ]
    }

    fn stars(entries: &[RepoEntry]) -> Vec<u64> {
        entries.iter().filter_map(|e| e.summary()).map(|s| s.stars).collect()
    }

    fn forks(entries: &[RepoEntry]) -> Vec<u64> {
        entries.iter().filter_map(|e| e.summary()).map(|s| s.forks).collect()
    }

    #[test]
    fn best_match_keeps_input_order() {
        assert_eq!(sort_entries(&sample(), SortMode::BestMatch), sample());
    }

    #[test]
    fn most_stars_is_descending() {
        let sorted = sort_entries(&sample(), SortMode::MostStars);
        assert!(stars(&sorted).windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn least_stars_is_ascending() {
        let sorted = sort_entries(&sample(), SortMode::LeastStars);
        assert_eq!(stars(&sorted), vec![5, 10, 50, 50]);
    }

    #[test]
    fn most_forks_is_descending() {
        let sorted = sort_entries(&sample(), SortMode::MostForks);
        assert_eq!(forks(&sorted), vec![9, 3, 1, 0]);
    }

    #[test]
    fn least_forks_is_ascending() {
        let sorted = sort_entries(&sample(), SortMode::LeastForks);
        assert_eq!(forks(&sorted), vec![0, 1, 3, 9]);
    }

    #[test]
    fn failed_entries_sort_last() {
        for mode in [
            SortMode::MostStars,
            SortMode::LeastStars,
            SortMode::MostForks,
            SortMode::LeastForks,
        ] {
            let sorted = sort_entries(&sample(), mode);
            assert!(sorted.last().unwrap().is_failed(), "{:?}", mode);
        }
    }

    #[test]
    fn resorting_is_idempotent() {
        let first = sort_entries(&sample(), SortMode::MostStars);
        let second = sort_entries(&sample(), SortMode::MostStars);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(sort_entries(&[], SortMode::MostForks).is_empty());
    }
}
