//! bcc - CLI companion for the Basecamp Classic API

use clap::{CommandFactory, Parser};

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod output;
mod prompt;
mod records;

use cli::{CacheCommands, Cli, Commands, CommandContext};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init => cli::init::run(config_path),
        Commands::Status => cli::status::run(config_path),
        Commands::Get { endpoint, fields } => {
            let mut ctx = CommandContext::new(config_path, cli.no_cache)?;
            cli::fetch::run(&mut ctx, &endpoint, fields.as_deref()).await
        }
        Commands::Post {
            endpoint,
            body,
            fields,
        } => {
            let mut ctx = CommandContext::new(config_path, cli.no_cache)?;
            cli::mutate::post(&mut ctx, &endpoint, body, fields.as_deref()).await
        }
        Commands::Delete { endpoint, fields } => {
            let mut ctx = CommandContext::new(config_path, cli.no_cache)?;
            cli::mutate::delete(&mut ctx, &endpoint, fields.as_deref()).await
        }
        Commands::Search {
            endpoint,
            query,
            fields,
        } => {
            let mut ctx = CommandContext::new(config_path, cli.no_cache)?;
            cli::query::search(&mut ctx, &endpoint, &query, fields.as_deref()).await
        }
        Commands::Xpath {
            endpoint,
            expr,
            fields,
        } => {
            let mut ctx = CommandContext::new(config_path, cli.no_cache)?;
            cli::query::xpath(&mut ctx, &endpoint, &expr, fields.as_deref()).await
        }
        Commands::Browse { id, record_type } => {
            let ctx = CommandContext::new(config_path, cli.no_cache)?;
            cli::browse::run(&ctx, id, &record_type)
        }
        Commands::Cache(cache_cmd) => match cache_cmd {
            CacheCommands::Path => cli::cache::path(config_path),
            CacheCommands::Clear => cli::cache::clear(config_path),
        },
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}
