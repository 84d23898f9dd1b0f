use serde::Deserialize;

/// Optional defaults loaded from the config file. Every field can also be
/// given on the command line, and flags win.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    /// Repository in "owner/repo" format
    pub repo: Option<String>,
    /// GitHub token with repo access
    pub token: Option<String>,
    /// Maximum age of PRs to include, in days
    pub max_age: Option<i64>,
    /// Comma separated list of authors to exclude
    pub excluded_authors: Option<String>,
    /// Comma separated list of authors to include
    pub authors: Option<String>,
    /// Maximum number of PRs to request
    pub max_prs: Option<usize>,
}
