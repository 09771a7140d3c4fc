//! CLI parse: clap types for Skillwright. Definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Skillwright CLI - build agent skills for ecosystem apps
#[derive(Parser)]
#[command(name = "skillwright")]
#[command(about = "Select ecosystem apps, generate their skills concurrently and prepare registration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List catalog apps
    Catalog {
        /// Category filter ("all" for every category)
        #[arg(long, default_value = "all")]
        category: String,
        /// Case-insensitive keyword matched against name, description and tags
        #[arg(long)]
        search: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration as TOML
    Config,
    /// Generate skills for up to the configured number of apps
    Build {
        /// App and prompt as ID=PROMPT (repeatable)
        #[arg(long = "skill", value_name = "ID=PROMPT", required = true, value_parser = parse_skill_arg)]
        skills: Vec<SkillArg>,
        /// Write <DIR>/<id>/SKILL.md for every completed skill
        #[arg(long)]
        out: Option<PathBuf>,
        /// Prepare an on-chain registration for an agent with this name
        #[arg(long)]
        register: Option<String>,
        /// Signer wallet address for the registration
        #[arg(long, requires = "register")]
        wallet: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// One `--skill ID=PROMPT` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillArg {
    pub item_id: String,
    pub prompt: String,
}

pub fn parse_skill_arg(value: &str) -> Result<SkillArg, String> {
    let (item_id, prompt) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ID=PROMPT, got '{}'", value))?;
    let item_id = item_id.trim();
    if item_id.is_empty() {
        return Err("app id cannot be empty".to_string());
    }
    if prompt.trim().is_empty() {
        return Err(format!("prompt for '{}' cannot be empty", item_id));
    }
    Ok(SkillArg {
        item_id: item_id.to_string(),
        prompt: prompt.to_string(),
    })
}
