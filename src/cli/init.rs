//! Init command implementation

use colored::Colorize;

use crate::config::Config;
use crate::error::Result;
use crate::prompt::TerminalPrompter;

/// Run the interactive setup: prompt for all credentials from scratch and
/// write the config file.
pub fn run(config_path: Option<&str>) -> Result<()> {
    println!("{}", "Welcome to bcc!".bold().green());
    println!("Let's set up your Basecamp Classic credentials.\n");

    let mut config = Config::load_or_default(config_path)?;

    // Re-prompt everything, keeping lifetimes and other settings
    config.api_url = None;
    config.api_key = None;
    config.api_user_email = None;
    config.ensure_credentials(&TerminalPrompter)?;
    config.save_at(config_path)?;

    let path = Config::resolve_path(config_path)?;
    println!("\n{}", "✓ Configuration saved!".green());
    println!("Config file: {}", path.display().to_string().cyan());
    println!("\nTry: {}", "bcc get projects".bold());
    Ok(())
}
