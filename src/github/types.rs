use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct PullRequest {
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    /// A PR counts as merged when GitHub recorded a merge time for it
    pub fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }

    /// Time the PR spent open, defined only for merged PRs
    pub fn open_duration(&self) -> Option<Duration> {
        self.merged_at.map(|merged_at| merged_at - self.created_at)
    }

    /// Whole days since the merge (truncated), defined only for merged PRs
    pub fn merged_days_ago(&self, now: DateTime<Utc>) -> Option<i64> {
        self.merged_at.map(|merged_at| (now - merged_at).num_days())
    }
}
