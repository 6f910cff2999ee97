//! Configuration management for bcc

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConfigError, Error, Result};
use crate::prompt::Prompter;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Basecamp Classic base URL, normalized to `https://<host>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Basecamp Classic API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// User e-mail, filled into the request user agent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_user_email: Option<String>,

    /// Whether to cache GET responses on disk
    #[serde(default = "default_cache")]
    pub cache: bool,

    /// How long cached responses stay fresh, in seconds
    #[serde(default = "default_cache_lifetime")]
    pub cache_lifetime_secs: u64,

    /// How long cached browser-session tokens stay fresh, in seconds
    #[serde(default = "default_token_lifetime")]
    pub token_lifetime_secs: u64,
}

fn default_cache() -> bool {
    true
}

fn default_cache_lifetime() -> u64 {
    86_400 // 24 hours
}

fn default_token_lifetime() -> u64 {
    2_592_000 // 30 days
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            api_user_email: None,
            cache: default_cache(),
            cache_lifetime_secs: default_cache_lifetime(),
            token_lifetime_secs: default_token_lifetime(),
        }
    }
}

impl Config {
    /// Resolve the config file path (`~/.bcc/config.yaml` unless overridden)
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => {
                let home = dirs::home_dir().ok_or(ConfigError::Invalid(
                    "Could not determine home directory".to_string(),
                ))?;
                Ok(home.join(".bcc").join("config.yaml"))
            }
        }
    }

    /// The cache root lives next to the config file: `<config-dir>/cache`
    pub fn cache_root(path: Option<&str>) -> Result<PathBuf> {
        let config_path = Self::resolve_path(path)?;
        let dir = config_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default();
        Ok(dir.join("cache"))
    }

    /// Load configuration, erroring if the file does not exist
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when no file exists yet
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match Self::load_at(path) {
            Ok(config) => Ok(config),
            Err(Error::Config(ConfigError::NotFound)) => Ok(Self::default()),
            Err(err) => Err(err),
        }
    }

    /// Save configuration, creating the config directory as needed
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        let path = Self::resolve_path(path)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(&path, contents)?;

        // Config holds the API key; keep it private to the user
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Prompt for any missing credential and normalize what was entered.
    ///
    /// Returns `true` when something changed and the config should be saved.
    pub fn ensure_credentials(&mut self, prompter: &dyn Prompter) -> Result<bool> {
        let mut changed = false;

        if self.api_url.as_deref().unwrap_or("").trim().is_empty() {
            let raw = prompter.prompt(
                "Enter Basecamp Classic base URL - eg. companyxyz.basecamphq.com",
            )?;
            self.api_url = Some(Self::normalize_api_url(&raw));
            changed = true;
        }

        if self.api_key.as_deref().unwrap_or("").trim().is_empty() {
            let url = self.api_url.as_deref().unwrap_or_default();
            let raw = prompter.prompt(&format!(
                "Enter Basecamp Classic API key (from {url}/people/me/edit)"
            ))?;
            self.api_key = Some(raw.trim().to_string());
            changed = true;
        }

        if self.api_user_email.as_deref().unwrap_or("").trim().is_empty() {
            let raw = prompter.prompt("Enter e-mail address to identify API usage")?;
            self.api_user_email = Some(raw.trim().to_string());
            changed = true;
        }

        Ok(changed)
    }

    /// Normalize a user-entered base URL to `https://<host>`: surrounding
    /// whitespace and slashes dropped, any scheme and path stripped.
    pub fn normalize_api_url(raw: &str) -> String {
        let trimmed = raw.trim().trim_matches('/').trim();
        let no_scheme = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .unwrap_or(trimmed);
        let host = no_scheme.split('/').next().unwrap_or_default();
        format!("https://{host}")
    }

    /// Validate that all credentials are present
    pub fn validate_credentials(&self) -> Result<()> {
        if self.api_url.is_none() || self.api_key.is_none() || self.api_user_email.is_none() {
            return Err(ConfigError::MissingCredentials.into());
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_lifetime_secs)
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_lifetime_secs)
    }
}
