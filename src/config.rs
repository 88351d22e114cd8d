use crate::constants::{
    BASE_URL, DEFAULT_CONFIG_FILE, DEFAULT_DELAY_SECONDS, DEFAULT_MAX_RETRIES,
    DEFAULT_TIMEOUT_SECONDS, MAX_DELAY_SECONDS, US_STATES, USER_AGENT,
};
use crate::error::{Result, ScraperError};
use reqwest::Url;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Everything one scrape run needs to know. Built once, never mutated by the
/// pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub delay_seconds: u64,
    pub output_dir: PathBuf,
    pub states: Vec<String>,
    pub layout: SiteLayout,
}

/// Markers used to find the two listing blocks on a state page.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteLayout {
    pub recommended_heading: String,
    pub recommended_container_class: String,
    pub regular_heading: String,
    pub regular_container_class: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_retries: DEFAULT_MAX_RETRIES,
            delay_seconds: DEFAULT_DELAY_SECONDS,
            output_dir: PathBuf::from("."),
            states: US_STATES.iter().map(|s| s.to_string()).collect(),
            layout: SiteLayout::default(),
        }
    }
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self {
            recommended_heading: "Recommended HOA Management Companies".to_string(),
            recommended_container_class: "hoa-directory-recommended".to_string(),
            regular_heading: "HOA Management Companies".to_string(),
            regular_container_class: "hoa-directory-results".to_string(),
        }
    }
}

impl ScraperConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `hoa_scraper.toml` in the
    /// working directory is used when present, otherwise the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ScraperConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url).map_err(|e| {
            ScraperError::Config(format!("Invalid base_url '{}': {}", self.base_url, e))
        })?;
        if self.max_retries == 0 {
            return Err(ScraperError::Config(
                "max_retries must be at least 1".to_string(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(ScraperError::Config(
                "timeout_seconds must be at least 1".to_string(),
            ));
        }
        if self.delay_seconds > MAX_DELAY_SECONDS {
            return Err(ScraperError::Config(format!(
                "delay_seconds must be at most {}, got {}",
                MAX_DELAY_SECONDS, self.delay_seconds
            )));
        }
        if self.states.is_empty() {
            return Err(ScraperError::Config("states list is empty".to_string()));
        }
        Ok(())
    }

    /// Listing page URL for one state, with the name URL-encoded.
    pub fn state_url(&self, state: &str) -> Result<Url> {
        Url::parse_with_params(&self.base_url, &[("state", state)]).map_err(|e| {
            ScraperError::Config(format!("Invalid base_url '{}': {}", self.base_url, e))
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_seconds)
    }

    /// Pause between fetch attempts: twice the inter-state delay.
    pub fn retry_delay(&self) -> Duration {
        self.delay().saturating_mul(2)
    }

    /// Map user-supplied state names onto the configured list.
    ///
    /// Matching ignores case and surrounding whitespace; the canonical spelling
    /// is returned. Unknown names are logged and dropped.
    pub fn resolve_states<S: AsRef<str>>(&self, requested: &[S]) -> Vec<String> {
        let mut resolved = Vec::new();
        for name in requested {
            let wanted = name.as_ref().trim();
            match self.states.iter().find(|s| s.eq_ignore_ascii_case(wanted)) {
                Some(state) => {
                    if !resolved.contains(state) {
                        resolved.push(state.clone());
                    }
                }
                None => warn!("Unknown state '{}', skipping", wanted),
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_all_states() {
        let config = ScraperConfig::default();
        assert_eq!(config.states.len(), 50);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.delay_seconds, 2);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.retry_delay(), Duration::from_secs(4));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ScraperConfig::from_toml_str(
            r#"
            delay_seconds = 5
            output_dir = "output"

            [layout]
            regular_container_class = "directory-list"
            "#,
        )
        .unwrap();
        assert_eq!(config.delay_seconds, 5);
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.layout.regular_container_class, "directory-list");
        assert_eq!(
            config.layout.recommended_container_class,
            "hoa-directory-recommended"
        );
        assert_eq!(config.base_url, BASE_URL);
    }

    #[test]
    fn rejects_zero_retries() {
        let config = ScraperConfig {
            max_retries: 0,
            ..ScraperConfig::default()
        };
        assert!(matches!(config.validate(), Err(ScraperError::Config(_))));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = ScraperConfig {
            timeout_seconds: 0,
            ..ScraperConfig::default()
        };
        assert!(matches!(config.validate(), Err(ScraperError::Config(_))));
    }

    #[test]
    fn rejects_delay_above_limit() {
        let config = ScraperConfig {
            delay_seconds: MAX_DELAY_SECONDS + 1,
            ..ScraperConfig::default()
        };
        assert!(matches!(config.validate(), Err(ScraperError::Config(_))));

        let config = ScraperConfig {
            delay_seconds: MAX_DELAY_SECONDS,
            ..ScraperConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn retry_delay_saturates_on_huge_delay() {
        let config = ScraperConfig {
            delay_seconds: u64::MAX,
            ..ScraperConfig::default()
        };
        assert_eq!(config.retry_delay(), Duration::MAX);
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let config = ScraperConfig {
            base_url: "not a url".to_string(),
            ..ScraperConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let result = ScraperConfig::load(Some(Path::new("/nonexistent/hoa_scraper.toml")));
        assert!(matches!(result, Err(ScraperError::Config(_))));
    }

    #[test]
    fn state_url_encodes_spaces() {
        let config = ScraperConfig::default();
        let url = config.state_url("New Hampshire").unwrap();
        assert_eq!(
            url.as_str(),
            "https://hoa-usa.com/management-directory/?state=New+Hampshire"
        );
    }

    #[test]
    fn resolves_states_case_insensitively() {
        let config = ScraperConfig::default();
        let states = config.resolve_states(&["alabama", " new york ", "Atlantis", "Alabama"]);
        assert_eq!(states, vec!["Alabama".to_string(), "New York".to_string()]);
    }
}
