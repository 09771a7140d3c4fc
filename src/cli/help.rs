//! Command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name string for log records (e.g. "catalog", "build").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Catalog { .. } => "catalog",
        Commands::Config => "config",
        Commands::Build { .. } => "build",
    }
}
