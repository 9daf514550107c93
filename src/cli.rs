//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{changelog_command_name, command_name, is_mutation};
pub use output::map_error;
pub use parse::{ChangelogCommands, Cli, Commands};
pub use presentation::{
    format_check_json, format_check_text, format_init_summary, format_section_heading,
    format_status_json, format_status_text, format_version_report, use_color,
};
pub use route::{parse_package_bump, AddRequest, RunContext};
