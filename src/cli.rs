//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration beyond driving one session per command.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{parse_skill_arg, Cli, Commands, SkillArg};
pub use presentation::{
    format_build_json, format_build_text, format_catalog_json, format_catalog_text, status_label,
};
pub use route::{write_skill_files, BuildOptions, BuildReport, RunContext, SKILL_FILE_NAME};
