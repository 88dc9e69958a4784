use std::collections::HashMap;

use crate::models::RepositorySummary;

/// Totals shown under a profile, derived from its repository list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RepoStats {
    pub repos: usize,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    /// Language and number of repositories using it, most common first.
    pub languages: Vec<(String, usize)>,
}

impl RepoStats {
    pub fn from_repos(repos: &[RepositorySummary]) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut stats = RepoStats {
            repos: repos.len(),
            ..RepoStats::default()
        };

        for repo in repos {
            stats.stars = stats.stars.saturating_add(repo.stargazers_count);
            stats.forks = stats.forks.saturating_add(repo.forks_count);
            stats.watchers = stats.watchers.saturating_add(repo.watchers_count);
            if let Some(lang) = repo.language.as_deref() {
                *counts.entry(lang).or_default() += 1;
            }
        }

        let mut languages: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(lang, n)| (lang.to_string(), n))
            .collect();
        languages.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        stats.languages = languages;

        stats
    }

    /// `"Rust, Go, HTML"` for the `limit` most common languages.
    pub fn top_languages(&self, limit: usize) -> String {
        self.languages
            .iter()
            .take(limit)
            .map(|(lang, _)| lang.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
