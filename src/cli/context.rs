//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for config loading, credential prompting, and client initialization.

use crate::cache::CacheStorage;
use crate::client::Api;
use crate::config::Config;
use crate::error::Result;
use crate::prompt::{SystemOpener, TerminalPrompter};

/// Shared state for API-backed commands: loaded config and a ready client.
pub struct CommandContext {
    pub config: Config,
    pub api: Api,
}

impl CommandContext {
    /// Load config (prompting for any missing credentials and saving them
    /// back), open the cache, and build the API client.
    pub fn new(config_path: Option<&str>, no_cache: bool) -> Result<Self> {
        let mut config = Config::load_or_default(config_path)?;

        let prompter = TerminalPrompter;
        if config.ensure_credentials(&prompter)? {
            config.save_at(config_path)?;
        }

        let store = CacheStorage::open_at(&Config::cache_root(config_path)?);
        let cache_enabled = config.cache && !no_cache;

        let api = Api::new(
            &config,
            store,
            cache_enabled,
            Box::new(TerminalPrompter),
            Box::new(SystemOpener),
        )?;

        Ok(Self { config, api })
    }
}
