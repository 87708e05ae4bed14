use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use ep_core::bootstrap::AuthState;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long, value_name = "config file", help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "dir", help = "Override the application data directory")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, help = "Treat the network as unavailable")]
    pub offline: bool,

    #[arg(
        long,
        value_enum,
        default_value_t = Identity::Anonymous,
        help = "Identity the auth collaborator resolves to"
    )]
    pub identity: Identity,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Run the full bootstrap sequence (default)
    Boot,
    /// Refresh the cached splash video in the foreground
    Refresh,
    /// Remove the cached splash video, its marker and the cached settings
    ClearCache,
    /// Report what the splash cache currently holds
    Status,
    /// Normalize a payment callback location
    Callback {
        /// Location as navigated to, e.g. `/subscription/result?q=su&data=...`
        location: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Identity {
    LoggedIn,
    Guest,
    Anonymous,
}

impl From<Identity> for AuthState {
    fn from(identity: Identity) -> Self {
        match identity {
            Identity::LoggedIn => AuthState::LoggedIn,
            Identity::Guest => AuthState::Guest,
            Identity::Anonymous => AuthState::Anonymous,
        }
    }
}
