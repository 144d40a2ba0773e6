use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::constants::{
    CONFIG_ENV_VAR, DEFAULT_CONCURRENCY, DEFAULT_CONFIG_FILE, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};
use crate::error::{Result, ScraperError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
    pub concurrency: usize,
    pub show_progress: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            concurrency: DEFAULT_CONCURRENCY,
            show_progress: true,
        }
    }
}

impl CrawlerConfig {
    /// Resolve configuration: explicit path, then `$CRAWLER_CONFIG`, then
    /// `crawler.toml` in the working directory, then built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::load_from(&PathBuf::from(path));
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            return Self::load_from(default_path);
        }
        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "Loaded crawler config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CrawlerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(ScraperError::Config("concurrency must be at least 1".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ScraperError::Config("timeout_secs must be at least 1".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = CrawlerConfig::from_toml_str("concurrency = 3\n").unwrap();
        assert_eq!(config.concurrency, 3);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(config.show_progress);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            CrawlerConfig::from_toml_str("concurrency = 0"),
            Err(ScraperError::Config(_))
        ));
        assert!(matches!(
            CrawlerConfig::from_toml_str("timeout_secs = \"ten\""),
            Err(ScraperError::Toml(_))
        ));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crawler.toml");
        fs::write(&path, "timeout_secs = 30\nshow_progress = false\n").unwrap();

        let config = CrawlerConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.show_progress);

        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            CrawlerConfig::load(Some(missing.as_path())),
            Err(ScraperError::Config(_))
        ));
    }
}
