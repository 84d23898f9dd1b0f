use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::github::types::PullRequest;

/// Case-insensitive set of author logins, parsed from a comma separated list.
#[derive(Debug, Clone, Default)]
pub struct AuthorSet {
    names: HashSet<String>,
}

impl AuthorSet {
    /// Parse "alice, Bob,dependabot[bot]" into a lowercased set.
    /// Entries are trimmed; empty entries are dropped.
    pub fn parse(list: &str) -> Self {
        let names = list
            .split(',')
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();

        AuthorSet { names }
    }

    pub fn contains(&self, author: &str) -> bool {
        self.names.contains(&author.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Display for AuthorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        write!(f, "{}", names.join(", "))
    }
}

/// Keep only PRs that have been merged
pub fn merged_only(prs: Vec<PullRequest>) -> Vec<PullRequest> {
    prs.into_iter().filter(|pr| pr.is_merged()).collect()
}

/// Keep only PRs merged within the last `max_age_days` whole days
pub fn max_age(prs: Vec<PullRequest>, max_age_days: i64, now: DateTime<Utc>) -> Vec<PullRequest> {
    prs.into_iter()
        .filter(|pr| {
            pr.merged_days_ago(now)
                .is_some_and(|days| days < max_age_days)
        })
        .collect()
}

/// Drop PRs whose author is in the set
pub fn exclude_authors(prs: Vec<PullRequest>, authors: &AuthorSet) -> Vec<PullRequest> {
    prs.into_iter()
        .filter(|pr| !authors.contains(&pr.author))
        .collect()
}

/// Keep only PRs whose author is in the set
pub fn include_authors(prs: Vec<PullRequest>, authors: &AuthorSet) -> Vec<PullRequest> {
    prs.into_iter()
        .filter(|pr| authors.contains(&pr.author))
        .collect()
}
