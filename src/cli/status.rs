//! Status command implementation

use colored::Colorize;

use crate::cache::CacheStorage;
use crate::config::Config;
use crate::error::Result;

/// Show configuration, credential, and cache status.
pub fn run(config_path: Option<&str>) -> Result<()> {
    println!("{}\n", "bcc Configuration Status".bold());

    let config_file = Config::resolve_path(config_path)?;
    println!("Config file: {}", config_file.display().to_string().cyan());

    let config = match Config::load_at(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("\n{} {}", "✗".red(), e);
            println!("  → Run '{}' to get started", "bcc init".bold());
            return Ok(());
        }
    };

    println!();
    credential_line("Base URL", config.api_url.as_deref());
    credential_line("API key", config.api_key.as_deref().map(|_| "configured"));
    credential_line("User e-mail", config.api_user_email.as_deref());

    println!();
    if config.cache {
        println!(
            "Cache: {} (responses fresh for {}s)",
            "enabled".green(),
            config.cache_lifetime_secs
        );
    } else {
        println!("Cache: {}", "disabled".yellow());
    }

    let store = CacheStorage::open_at(&Config::cache_root(config_path)?);
    println!("Cache directory: {}", store.root().display().to_string().cyan());
    if store.load_tokens(config.token_ttl()).is_some() {
        println!("{} Browser session tokens cached", "✓".green());
    } else {
        println!("{} No cached browser session tokens", "✗".dimmed());
    }

    Ok(())
}

fn credential_line(label: &str, value: Option<&str>) {
    match value {
        Some(value) if !value.trim().is_empty() => {
            println!("{} {}: {}", "✓".green(), label, value)
        }
        _ => {
            println!("{} {}: {}", "✗".red(), label, "not configured".dimmed());
            println!("  → Run '{}' to configure", "bcc init".bold());
        }
    }
}
