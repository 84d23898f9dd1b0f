use anyhow::{Context, Result};
use octocrab::Octocrab;

/// Create a GitHub client, authenticated when a personal access token is given.
/// Public repositories work without a token, at the anonymous rate limit.
pub fn create_client(token: Option<String>) -> Result<Octocrab> {
    let mut builder = Octocrab::builder();
    if let Some(token) = token {
        builder = builder.personal_token(token);
    }

    builder.build().context("Failed to create GitHub client")
}
