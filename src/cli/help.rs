//! CLI help and command-name contract for log spans.

use crate::cli::parse::{ChangelogCommands, Commands};

/// Command name for the command span (e.g. "status", "changelog.cleanup").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Init { .. } => "init".to_string(),
        Commands::Add { .. } => "add".to_string(),
        Commands::Check { .. } => "check".to_string(),
        Commands::Status { .. } => "status".to_string(),
        Commands::Version { .. } => "version".to_string(),
        Commands::ReleaseNotes { .. } => "release_notes".to_string(),
        Commands::Changelog { command } => format!("changelog.{}", changelog_command_name(command)),
    }
}

pub fn changelog_command_name(command: &ChangelogCommands) -> &'static str {
    match command {
        ChangelogCommands::Cleanup { .. } => "cleanup",
        ChangelogCommands::RenameHeader { .. } => "rename_header",
    }
}

/// Whether the command writes to the workspace (dry runs and checks do not).
pub fn is_mutation(command: &Commands) -> bool {
    match command {
        Commands::Init { .. } | Commands::Add { .. } => true,
        Commands::Version { dry_run, .. } => !*dry_run,
        Commands::ReleaseNotes { out, .. } => out.is_some(),
        Commands::Changelog { command } => match command {
            ChangelogCommands::Cleanup { check, .. } => !*check,
            ChangelogCommands::RenameHeader { .. } => true,
        },
        Commands::Check { .. } | Commands::Status { .. } => false,
    }
}
