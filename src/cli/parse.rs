//! CLI parse: clap types for changegen. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// changegen CLI - changeset-driven versioning and changelogs
#[derive(Parser)]
#[command(name = "changegen")]
#[command(about = "Changeset-driven versioning, changelogs and release notes for package workspaces")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false", conflicts_with = "verbose")]
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

    /// Log file path (used when output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the changeset directory, its README and a default changegen.toml
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
    /// Write a new changeset (prompts when no package is given)
    Add {
        /// Package release as NAME:BUMP, e.g. @acme/tree:minor (repeatable)
        #[arg(long = "package", short = 'p', value_name = "NAME:BUMP")]
        packages: Vec<String>,
        /// Changelog section name
        #[arg(long)]
        section: Option<String>,
        /// Title line
        #[arg(long)]
        title: Option<String>,
        /// Markdown description
        #[arg(long)]
        body: Option<String>,
        /// List first in the release notes
        #[arg(long)]
        highlight: bool,
        /// Keep out of the release notes
        #[arg(long)]
        exclude_from_release_notes: bool,
        /// Write a changeset that releases nothing
        #[arg(long, conflicts_with = "packages")]
        empty: bool,
    },
    /// Validate changesets against the workspace and configuration
    Check {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the pending release plan
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Apply pending changesets: bump versions, write changelogs, delete changesets
    Version {
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
        /// Leave consumed changeset files in place
        #[arg(long)]
        keep_changesets: bool,
    },
    /// Render release notes for the pending changesets
    ReleaseNotes {
        /// Version shown in the title
        #[arg(long)]
        version: Option<String>,
        /// Title text (default from config)
        #[arg(long)]
        heading: Option<String>,
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Changelog maintenance
    Changelog {
        #[command(subcommand)]
        command: ChangelogCommands,
    },
}

#[derive(Subcommand)]
pub enum ChangelogCommands {
    /// Remove empty sections from package changelogs
    Cleanup {
        /// Only this package
        #[arg(long)]
        package: Option<String>,
        /// Report empty sections and fail instead of rewriting
        #[arg(long)]
        check: bool,
    },
    /// Rename a release header, e.g. a prerelease header to the final version
    RenameHeader {
        /// Header version to replace
        #[arg(long)]
        from: String,
        /// Replacement version
        #[arg(long)]
        to: String,
        /// Only this package
        #[arg(long)]
        package: Option<String>,
    },
}
