use crate::cms_client::DEFAULT_USER_AGENT;
use crate::parser::DEFAULT_SITE_BASE;
use crate::report::DEFAULT_OUTPUT;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the session cookie value.
pub const ENV_SESSION: &str = "SMOGON_SESSION";
/// Environment variable holding the default user id.
pub const ENV_USER_ID: &str = "USER_ID";

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub session: String,
    pub user_id: String,
    pub base_url: String,
    pub user_agent: String,
    pub output: PathBuf,
    pub timeout_secs: u64,
}

/// Values given on the command line; they win over the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub user_id: Option<String>,
    pub session: Option<String>,
    pub output: Option<PathBuf>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load `.env`, then resolve against the process environment.
    pub fn load(overrides: Overrides) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`] without command-line overrides.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::load(Overrides::default())
    }

    /// Merge overrides with values from `lookup` and validate the result.
    pub fn resolve(
        overrides: Overrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let config = Self {
            user_id: overrides
                .user_id
                .or_else(|| lookup(ENV_USER_ID))
                .ok_or_else(|| {
                    anyhow::anyhow!("User ID is required (use --user <ID> or set USER_ID)")
                })
                .and_then(|id| {
                    if id.trim().is_empty() {
                        anyhow::bail!("User ID cannot be empty");
                    }
                    Ok(id.trim().to_string())
                })?,
            session: overrides
                .session
                .or_else(|| lookup(ENV_SESSION))
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "Session cookie is required (use --session <COOKIE> or set SMOGON_SESSION)"
                    )
                })
                .and_then(|session| {
                    if session.trim().is_empty() {
                        anyhow::bail!("SMOGON_SESSION cannot be empty");
                    }
                    Ok(session.trim().to_string())
                })?,
            base_url: validate_base_url(
                overrides
                    .base_url
                    .or_else(|| lookup("SMOGON_BASE_URL"))
                    .unwrap_or_else(|| DEFAULT_SITE_BASE.to_string()),
            )?,
            user_agent: lookup("SMOGON_USER_AGENT")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            output: overrides
                .output
                .or_else(|| lookup("SMOGON_OUTPUT").map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            timeout_secs: match overrides.timeout_secs {
                Some(secs) => secs,
                None => lookup("SMOGON_TIMEOUT_SECS")
                    .unwrap_or_else(|| "30".to_string())
                    .parse()
                    .map_err(|_| {
                        anyhow::anyhow!("SMOGON_TIMEOUT_SECS must be a positive number of seconds")
                    })?,
            },
        };

        if config.timeout_secs == 0 {
            anyhow::bail!("Timeout must be at least 1 second");
        }

        // Never log the session itself
        tracing::debug!("User ID: {}", config.user_id);
        tracing::debug!("Session: {}", mask_secret(&config.session));
        tracing::debug!("Base URL: {}", config.base_url);
        tracing::debug!("Output: {}", config.output.display());

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn validate_base_url(raw: String) -> anyhow::Result<String> {
    let url = raw.trim().trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("SMOGON_BASE_URL must start with http:// or https://");
    }
    url::Url::parse(&url)
        .map_err(|e| anyhow::anyhow!("SMOGON_BASE_URL is not a valid URL: {}", e))?;
    Ok(url)
}

/// Shows only the first and last four characters of a secret.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_resolve_from_env_with_defaults() {
        let config = Config::resolve(
            Overrides::default(),
            env(&[("SMOGON_SESSION", "abc123"), ("USER_ID", "641532")]),
        )
        .unwrap();

        assert_eq!(config.session, "abc123");
        assert_eq!(config.user_id, "641532");
        assert_eq!(config.base_url, "https://www.smogon.com");
        assert_eq!(config.user_agent, "SmogonContribScraper/1.0");
        assert_eq!(config.output, PathBuf::from("contributions.json"));
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_overrides_win() {
        let overrides = Overrides {
            user_id: Some("1".into()),
            session: Some("cli-cookie".into()),
            output: Some(PathBuf::from("out/data.json")),
            base_url: Some("http://localhost:8080/".into()),
            timeout_secs: Some(5),
        };
        let config = Config::resolve(
            overrides,
            env(&[("SMOGON_SESSION", "env-cookie"), ("USER_ID", "2")]),
        )
        .unwrap();

        assert_eq!(config.user_id, "1");
        assert_eq!(config.session, "cli-cookie");
        assert_eq!(config.output, PathBuf::from("out/data.json"));
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_missing_required_values() {
        let err = Config::resolve(Overrides::default(), env(&[("USER_ID", "1")])).unwrap_err();
        assert!(err.to_string().contains("Session cookie is required"));

        let err =
            Config::resolve(Overrides::default(), env(&[("SMOGON_SESSION", "x")])).unwrap_err();
        assert!(err.to_string().contains("User ID is required"));

        let err = Config::resolve(
            Overrides::default(),
            env(&[("SMOGON_SESSION", "  "), ("USER_ID", "1")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_invalid_base_url_and_timeout() {
        let base = [("SMOGON_SESSION", "x"), ("USER_ID", "1")];

        let err = Config::resolve(
            Overrides {
                base_url: Some("ftp://smogon.com".into()),
                ..Default::default()
            },
            env(&base),
        )
        .unwrap_err();
        assert!(err.to_string().contains("http://"));

        let err = Config::resolve(
            Overrides {
                timeout_secs: Some(0),
                ..Default::default()
            },
            env(&base),
        )
        .unwrap_err();
        assert!(err.to_string().contains("at least 1 second"));

        let err = Config::resolve(
            Overrides::default(),
            env(&[("SMOGON_SESSION", "x"), ("USER_ID", "1"), ("SMOGON_TIMEOUT_SECS", "soon")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("SMOGON_TIMEOUT_SECS"));
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcdefghijkl"), "abcd...ijkl");
        assert_eq!(mask_secret("short"), "***");
        assert_eq!(mask_secret(""), "***");
    }
}
