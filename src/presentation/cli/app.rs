use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// alertkeeper: admin-owned alerts kept in sync with a monitoring backend
///
/// Serves the alert HTTP API and offers local administration commands
/// against the same database.
#[derive(Parser, Debug)]
#[command(name = "alertkeeper")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    #[command(alias = "s")]
    Serve {
        /// Listen address override (e.g. 0.0.0.0:8080)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Manage users
    #[command(alias = "u")]
    User {
        #[command(subcommand)]
        command: UserCommand,
    },

    /// Manage alerts
    #[command(alias = "a")]
    Alert {
        #[command(subcommand)]
        command: AlertCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Register a user so it can own alerts
    Add {
        /// User name as issued by the identity system
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AlertCommand {
    /// Create an alert owned by the acting user
    Create {
        /// Unique alert name
        name: String,

        /// Initial state (true/false, 1/0, t/f)
        #[arg(long)]
        enabled: Option<String>,

        /// Acting user
        #[arg(long = "as", value_name = "USER")]
        as_user: String,
    },

    /// Enable or disable an alert and push it to the monitoring backend
    Update {
        /// Alert id
        id: i64,

        /// New state (true/false, 1/0, t/f)
        #[arg(long)]
        enabled: String,

        /// Acting user
        #[arg(long = "as", value_name = "USER")]
        as_user: String,
    },

    /// Show one alert with its admins
    Get {
        /// Alert id
        id: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the alerts visible to the acting user
    List {
        /// Acting user (omit for an anonymous, empty listing)
        #[arg(long = "as", value_name = "USER")]
        as_user: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an alert
    Delete {
        /// Alert id
        id: i64,

        /// Acting user
        #[arg(long = "as", value_name = "USER")]
        as_user: String,
    },
}
