mod schema;

pub use schema::FileConfig;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::filter::AuthorSet;

pub const DEFAULT_MAX_AGE_DAYS: i64 = 30;
pub const DEFAULT_MAX_PRS: usize = 500;

/// Environment variable name for providing a GitHub token without a flag
pub const ENV_TOKEN_VAR: &str = "PR_DURATION_GH_TOKEN";

/// Get the config directory path (~/.config/pr-duration/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".config").join("pr-duration")
}

/// Get the default config file path (~/.config/pr-duration/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file.
///
/// With an explicit `path` the file must exist and parse. Without one the
/// default path is tried, and a missing file just means empty defaults,
/// since every setting can come from flags instead.
pub fn load_config(path: Option<PathBuf>) -> Result<FileConfig> {
    let (config_path, explicit) = match path {
        Some(path) => (path, true),
        None => (get_config_path(), false),
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(FileConfig::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: FileConfig = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

/// Check for a GitHub token in the PR_DURATION_GH_TOKEN environment variable.
/// Returns Some(token) if the env var is set and non-empty, None otherwise.
pub fn get_token_from_env() -> Option<String> {
    match std::env::var(ENV_TOKEN_VAR) {
        Ok(val) => {
            let trimmed = val.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

/// Effective settings after merging flags, environment, and config file
#[derive(Debug)]
pub struct Settings {
    pub owner: String,
    pub repo: String,
    pub token: Option<String>,
    pub max_age: i64,
    pub excluded_authors: AuthorSet,
    pub authors: AuthorSet,
    pub max_prs: usize,
}

impl Settings {
    /// Merge command line flags over the environment over the config file.
    /// `flags` carries the command line values in file-config shape.
    pub fn resolve(flags: FileConfig, file: FileConfig) -> Result<Self> {
        let repo_full = flags.repo.or(file.repo).context(
            "No repository given. Pass --repo <owner>/<repo> or set repo in the config file",
        )?;
        let (owner, repo) = parse_repo(&repo_full)?;

        let token = flags.token.or_else(get_token_from_env).or(file.token);

        Ok(Settings {
            owner,
            repo,
            token,
            max_age: flags
                .max_age
                .or(file.max_age)
                .unwrap_or(DEFAULT_MAX_AGE_DAYS),
            excluded_authors: AuthorSet::parse(
                &flags
                    .excluded_authors
                    .or(file.excluded_authors)
                    .unwrap_or_default(),
            ),
            authors: AuthorSet::parse(&flags.authors.or(file.authors).unwrap_or_default()),
            max_prs: flags.max_prs.or(file.max_prs).unwrap_or(DEFAULT_MAX_PRS),
        })
    }
}

/// Split "owner/repo" into its two parts
fn parse_repo(repo: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = repo.split('/').filter(|part| !part.is_empty()).collect();
    if parts.len() != 2 {
        anyhow::bail!("Invalid repo format: {} (expected <owner>/<repo>)", repo);
    }

    Ok((parts[0].to_string(), parts[1].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> FileConfig {
        FileConfig {
            repo: Some("rust-lang/rust".to_string()),
            token: Some("flag-token".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
repo: django/django
max_age: 60
excluded_authors: "dependabot[bot], renovate[bot]"
max_prs: 1000
"#;
        let config: FileConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.repo.as_deref(), Some("django/django"));
        assert_eq!(config.max_age, Some(60));
        assert_eq!(
            config.excluded_authors.as_deref(),
            Some("dependabot[bot], renovate[bot]")
        );
        assert_eq!(config.max_prs, Some(1000));
        assert_eq!(config.token, None);
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = Settings::resolve(flags(), FileConfig::default()).unwrap();
        assert_eq!(settings.owner, "rust-lang");
        assert_eq!(settings.repo, "rust");
        assert_eq!(settings.max_age, DEFAULT_MAX_AGE_DAYS);
        assert_eq!(settings.max_prs, DEFAULT_MAX_PRS);
        assert!(settings.excluded_authors.is_empty());
        assert!(settings.authors.is_empty());
    }

    #[test]
    fn test_resolve_flags_win_over_file() {
        let file = FileConfig {
            repo: Some("other/repo".to_string()),
            token: Some("file-token".to_string()),
            max_age: Some(90),
            ..Default::default()
        };
        let mut cli = flags();
        cli.max_age = Some(7);

        let settings = Settings::resolve(cli, file).unwrap();
        assert_eq!(settings.owner, "rust-lang");
        assert_eq!(settings.token.as_deref(), Some("flag-token"));
        assert_eq!(settings.max_age, 7);
    }

    #[test]
    fn test_resolve_file_fills_gaps() {
        let file = FileConfig {
            repo: Some("django/django".to_string()),
            max_prs: Some(42),
            authors: Some("alice,bob".to_string()),
            ..Default::default()
        };
        let settings = Settings::resolve(FileConfig::default(), file).unwrap();
        assert_eq!(settings.owner, "django");
        assert_eq!(settings.max_prs, 42);
        assert!(settings.authors.contains("Alice"));
    }

    #[test]
    fn test_resolve_requires_repo() {
        let result = Settings::resolve(FileConfig::default(), FileConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_repo_rejects_malformed() {
        assert!(parse_repo("no-slash").is_err());
        assert!(parse_repo("a/b/c").is_err());
        assert!(parse_repo("/").is_err());
        assert!(parse_repo("owner/repo").is_ok());
    }
}
