//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod browse;
pub mod cache;
pub mod context;
pub mod fetch;
pub mod init;
pub mod mutate;
pub mod query;
pub mod status;

pub use context::CommandContext;

/// bcc - CLI companion for the Basecamp Classic API
#[derive(Parser, Debug)]
#[command(name = "bcc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Override config file location
    #[arg(long, global = true, env = "BCC_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "BCC_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass cache, fetch fresh data from the API
    #[arg(long, global = true, env = "BCC_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize bcc configuration
    Init,

    /// Show configuration and credential status
    Status,

    /// Fetch an endpoint and print the raw XML response
    Get {
        /// API endpoint, e.g. 'projects' or 'projects/123/todo_lists'
        endpoint: String,

        /// Pass 'false' to suppress response output
        fields: Option<String>,
    },

    /// Post an XML body to an endpoint and print the response
    Post {
        /// API endpoint to post to
        endpoint: String,

        /// XML request body
        body: String,

        /// Pass 'false' to suppress response output
        fields: Option<String>,
    },

    /// Delete a resource and print the response
    Delete {
        /// API endpoint of the resource to delete
        endpoint: String,

        /// Pass 'false' to suppress response output
        fields: Option<String>,
    },

    /// Fetch an endpoint and list records containing a text query
    Search {
        /// API endpoint to search within
        endpoint: String,

        /// Text to look for in any record field
        query: String,

        /// Fields to show per result: comma-separated list, or '*' for all
        fields: Option<String>,
    },

    /// Fetch an endpoint and list records matching an XPath expression
    Xpath {
        /// API endpoint to query
        endpoint: String,

        /// XPath 1.0 expression selecting record elements
        expr: String,

        /// Fields to show per result: comma-separated list, or '*' for all
        fields: Option<String>,
    },

    /// Open a record's page in the browser
    Browse {
        /// Record id
        id: i64,

        /// Record type, e.g. 'project' or 'todo-item'
        #[arg(value_name = "TYPE")]
        record_type: String,
    },

    /// Manage the local response cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Print the cache directory path
    Path,

    /// Delete all cached responses and session tokens
    Clear,
}
