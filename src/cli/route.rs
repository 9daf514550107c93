//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::changelog::{cleanup, find_empty_sections, replace_version_headers};
use crate::changeset::parse::strip_heading_marker;
use crate::changeset::{error_count, lint, BumpType, ChangesetMetadata, ChangesetStore, NewChangeset};
use crate::cli::parse::{ChangelogCommands, Commands};
use crate::cli::presentation::{
    format_check_json, format_check_text, format_init_summary, format_status_json,
    format_status_text, format_version_report, use_color,
};
use crate::config::{ChangegenConfig, ConfigLoader, UnknownPackagePolicy};
use crate::error::ApiError;
use crate::init::initialize;
use crate::plan::{assemble_plan, ReleasePlan};
use crate::release_notes::{render_release_notes, ReleaseNotesOptions};
use crate::version::{apply_plan, VersionOptions};
use crate::workspace::{discover_packages, Package, Workspace};
use std::collections::BTreeMap;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: workspace root and loaded configuration.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config: ChangegenConfig,
}

/// Options for `add`, mirroring its flags.
#[derive(Debug, Clone, Default)]
pub struct AddRequest {
    pub packages: Vec<String>,
    pub section: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub highlight: bool,
    pub exclude_from_release_notes: bool,
    pub empty: bool,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Ok(Self::with_config(workspace_root, config))
    }

    pub fn with_config(workspace_root: PathBuf, config: ChangegenConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &ChangegenConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Init { force } => {
                let summary = initialize(&self.workspace_root, &self.config, *force)?;
                Ok(format_init_summary(&summary, &self.workspace_root, *force))
            }
            Commands::Add {
                packages,
                section,
                title,
                body,
                highlight,
                exclude_from_release_notes,
                empty,
            } => {
                let request = AddRequest {
                    packages: packages.clone(),
                    section: section.clone(),
                    title: title.clone(),
                    body: body.clone(),
                    highlight: *highlight,
                    exclude_from_release_notes: *exclude_from_release_notes,
                    empty: *empty,
                };
                self.handle_add(request)
            }
            Commands::Check { format } => self.handle_check(format),
            Commands::Status { format } => {
                let (_, plan) = self.plan()?;
                if format == "json" {
                    format_status_json(&plan)
                } else {
                    Ok(format_status_text(&plan, use_color()))
                }
            }
            Commands::Version {
                dry_run,
                keep_changesets,
            } => {
                let (workspace, plan) = self.plan()?;
                let options = VersionOptions {
                    dry_run: *dry_run,
                    keep_changesets: *keep_changesets,
                };
                let report = apply_plan(&workspace, &plan, &self.config, options)?;
                Ok(format_version_report(&report, &workspace.root))
            }
            Commands::ReleaseNotes {
                version,
                heading,
                out,
            } => self.handle_release_notes(version.clone(), heading.clone(), out.as_deref()),
            Commands::Changelog { command } => self.handle_changelog_command(command),
        }
    }

    fn store(&self) -> ChangesetStore {
        ChangesetStore::new(self.workspace_root.join(&self.config.changeset.dir))
    }

    fn workspace(&self) -> Result<Workspace, ApiError> {
        Ok(discover_packages(&self.workspace_root, &self.config.workspace)?)
    }

    fn plan(&self) -> Result<(Workspace, ReleasePlan), ApiError> {
        let workspace = self.workspace()?;
        let changesets = self.store().load_all()?;
        debug!(changesets = changesets.len(), packages = workspace.packages.len(), "Planning release");
        let plan = assemble_plan(&workspace, changesets, &self.config.release)?;
        Ok((workspace, plan))
    }

    /// Write a changeset from flags, prompting for anything missing on a terminal.
    pub fn handle_add(&self, request: AddRequest) -> Result<String, ApiError> {
        let workspace = self.workspace()?;
        let interactive = request.packages.is_empty() && !request.empty;

        let mut new = if interactive {
            if !std::io::stdin().is_terminal() {
                return Err(ApiError::InvalidInput(
                    "no packages given; pass --package NAME:BUMP or --empty".to_string(),
                ));
            }
            self.prompt_changeset(&workspace, &request)?
        } else {
            let mut releases = BTreeMap::new();
            for spec in &request.packages {
                let (name, bump) = parse_package_bump(spec)?;
                self.check_known_package(&workspace, &name)?;
                let entry = releases.entry(name).or_insert(bump);
                *entry = (*entry).max(bump);
            }
            NewChangeset {
                releases,
                metadata: ChangesetMetadata {
                    section: request.section.clone(),
                    highlight: request.highlight,
                    include_in_release_notes: !request.exclude_from_release_notes,
                    extra: BTreeMap::new(),
                },
                title: request.title.clone().unwrap_or_default(),
                body: request.body.clone().unwrap_or_default(),
            }
        };

        match &new.metadata.section {
            Some(section) if self.config.section(section).is_none() => {
                return Err(ApiError::InvalidInput(format!("unknown section '{}'", section)));
            }
            None if self.config.changeset.require_section => {
                return Err(ApiError::InvalidInput(
                    "a section is required (pass --section)".to_string(),
                ));
            }
            _ => {}
        }

        // The first line of a changeset is its title, so a description needs one.
        new.title = strip_heading_marker(new.title.trim()).to_string();
        if new.title.is_empty() && !new.body.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "a description needs a title (pass --title)".to_string(),
            ));
        }

        let path = self.store().write(&new)?;
        info!(path = %path.display(), releases = new.releases.len(), "Changeset created");
        Ok(format!(
            "Created changeset: {}",
            workspace.relative(&path).display()
        ))
    }

    fn check_known_package(&self, workspace: &Workspace, name: &str) -> Result<(), ApiError> {
        if workspace.contains(name) || self.config.release.unknown_packages != UnknownPackagePolicy::Error {
            return Ok(());
        }
        Err(ApiError::UnknownPackage {
            changeset: "<new>".to_string(),
            package: name.to_string(),
        })
    }

    fn prompt_changeset(&self, workspace: &Workspace, request: &AddRequest) -> Result<NewChangeset, ApiError> {
        use dialoguer::{Confirm, Input, MultiSelect, Select};

        let input_error = |e: dialoguer::Error| ApiError::InvalidInput(format!("Failed to get user input: {}", e));
        let names: Vec<&str> = workspace
            .packages
            .iter()
            .filter(|p| !self.config.release.is_ignored(&p.name))
            .map(|p| p.name.as_str())
            .collect();
        if names.is_empty() {
            return Err(ApiError::InvalidInput("no releasable packages in the workspace".to_string()));
        }

        let chosen = MultiSelect::new()
            .with_prompt("Packages to release (space to select)")
            .items(&names)
            .interact()
            .map_err(input_error)?;

        let bumps = [BumpType::Patch, BumpType::Minor, BumpType::Major];
        let bump_items: Vec<&str> = bumps.iter().map(|b| b.as_str()).collect();
        let mut releases = BTreeMap::new();
        for index in chosen {
            let name = names[index];
            let selection = Select::new()
                .with_prompt(format!("Bump for {}", name))
                .items(&bump_items)
                .default(0)
                .interact()
                .map_err(input_error)?;
            releases.insert(name.to_string(), bumps[selection]);
        }

        let section = match &request.section {
            Some(section) => Some(section.clone()),
            None => {
                let titles: Vec<String> = self
                    .config
                    .sections
                    .iter()
                    .map(|s| format!("{} ({})", s.title, s.name))
                    .collect();
                let default = self
                    .config
                    .sections
                    .iter()
                    .position(|s| s.name == self.config.changeset.default_section)
                    .unwrap_or(0);
                let selection = Select::new()
                    .with_prompt("Section")
                    .items(&titles)
                    .default(default)
                    .interact()
                    .map_err(input_error)?;
                self.config.sections.get(selection).map(|s| s.name.clone())
            }
        };

        let title: String = match &request.title {
            Some(title) => title.clone(),
            None => Input::<String>::new()
                .with_prompt("Title")
                .interact_text()
                .map_err(input_error)?,
        };
        let body: String = match &request.body {
            Some(body) => body.clone(),
            None => Input::<String>::new()
                .with_prompt("Description (optional)")
                .allow_empty(true)
                .interact_text()
                .map_err(input_error)?,
        };
        let highlight = request.highlight
            || Confirm::new()
                .with_prompt("Highlight in release notes?")
                .default(false)
                .interact()
                .map_err(input_error)?;

        Ok(NewChangeset {
            releases,
            metadata: ChangesetMetadata {
                section,
                highlight,
                include_in_release_notes: !request.exclude_from_release_notes,
                extra: BTreeMap::new(),
            },
            title,
            body,
        })
    }

    fn handle_check(&self, format: &str) -> Result<String, ApiError> {
        let workspace = self.workspace()?;
        let (changesets, failures) = self.store().load_lenient()?;
        let diagnostics = lint(&changesets, &failures, &workspace, &self.config);
        let count = changesets.len() + failures.len();

        let report = if format == "json" {
            format_check_json(&diagnostics, count)?
        } else {
            format_check_text(&diagnostics, count, &workspace.root, use_color())
        };

        let errors = error_count(&diagnostics);
        if errors > 0 {
            return Err(ApiError::ValidationFailed { errors, report });
        }
        Ok(report)
    }

    fn handle_release_notes(
        &self,
        version: Option<String>,
        heading: Option<String>,
        out: Option<&Path>,
    ) -> Result<String, ApiError> {
        let (_, plan) = self.plan()?;
        let options = ReleaseNotesOptions {
            heading: heading.unwrap_or_else(|| self.config.release_notes.heading.clone()),
            version,
            default_section: self.config.changeset.default_section.clone(),
        };
        let notes = render_release_notes(&plan, &self.config.sections, &options);

        match out {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    self.workspace_root.join(path)
                };
                std::fs::write(&path, &notes).map_err(|e| ApiError::io(&path, e))?;
                info!(path = %path.display(), "Release notes written");
                Ok(format!("Release notes written to {}", path.display()))
            }
            None => Ok(notes.trim_end().to_string()),
        }
    }

    fn handle_changelog_command(&self, command: &ChangelogCommands) -> Result<String, ApiError> {
        let workspace = self.workspace()?;
        match command {
            ChangelogCommands::Cleanup { package, check } => {
                self.handle_changelog_cleanup(&workspace, package.as_deref(), *check)
            }
            ChangelogCommands::RenameHeader { from, to, package } => {
                self.handle_rename_header(&workspace, from, to, package.as_deref())
            }
        }
    }

    /// Packages whose changelogs a maintenance command touches.
    fn selected_packages<'a>(
        &self,
        workspace: &'a Workspace,
        package: Option<&str>,
    ) -> Result<Vec<&'a Package>, ApiError> {
        match package {
            Some(name) => workspace
                .get(name)
                .map(|p| vec![p])
                .ok_or_else(|| ApiError::InvalidInput(format!("unknown package '{}'", name))),
            None => Ok(workspace.packages.iter().collect()),
        }
    }

    fn existing_changelogs(
        &self,
        workspace: &Workspace,
        package: Option<&str>,
    ) -> Result<Vec<(PathBuf, String)>, ApiError> {
        let mut changelogs = Vec::new();
        for p in self.selected_packages(workspace, package)? {
            let path = p.changelog_path(&self.config.changelog.file_name);
            if !path.is_file() {
                continue;
            }
            let text = std::fs::read_to_string(&path).map_err(|e| ApiError::io(&path, e))?;
            changelogs.push((path, text));
        }
        Ok(changelogs)
    }

    fn handle_changelog_cleanup(
        &self,
        workspace: &Workspace,
        package: Option<&str>,
        check: bool,
    ) -> Result<String, ApiError> {
        let mut lines = Vec::new();
        let mut total = 0;
        for (path, text) in self.existing_changelogs(workspace, package)? {
            let empty = find_empty_sections(&text);
            if empty == 0 {
                continue;
            }
            total += empty;
            let shown = workspace.relative(&path).display().to_string();
            if check {
                lines.push(format!("{}: {} empty section(s)", shown, empty));
            } else {
                let cleaned = cleanup(&text, &self.config.changelog.dependency_only_text);
                std::fs::write(&path, cleaned).map_err(|e| ApiError::io(&path, e))?;
                info!(path = %path.display(), sections = empty, "Changelog cleaned");
                lines.push(format!("{}: cleaned {} empty section(s)", shown, empty));
            }
        }

        if lines.is_empty() {
            return Ok("No empty changelog sections found.".to_string());
        }
        let report = lines.join("\n");
        if check {
            return Err(ApiError::ValidationFailed {
                errors: total,
                report,
            });
        }
        Ok(report)
    }

    fn handle_rename_header(
        &self,
        workspace: &Workspace,
        from: &str,
        to: &str,
        package: Option<&str>,
    ) -> Result<String, ApiError> {
        let mut lines = Vec::new();
        for (path, text) in self.existing_changelogs(workspace, package)? {
            let (renamed, count) = replace_version_headers(&text, from, to);
            if count == 0 {
                continue;
            }
            std::fs::write(&path, renamed).map_err(|e| ApiError::io(&path, e))?;
            info!(path = %path.display(), from = %from, to = %to, "Changelog headers renamed");
            lines.push(format!(
                "{}: renamed {} header(s)",
                workspace.relative(&path).display(),
                count
            ));
        }
        if lines.is_empty() {
            return Ok(format!("No '{}' headers found.", from));
        }
        Ok(lines.join("\n"))
    }
}

/// Parse `NAME:BUMP`; the last `:` separates the bump so scoped names work.
pub fn parse_package_bump(spec: &str) -> Result<(String, BumpType), ApiError> {
    let (name, bump) = spec.rsplit_once(':').ok_or_else(|| {
        ApiError::InvalidInput(format!("expected NAME:BUMP, got '{}'", spec))
    })?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidInput(format!("missing package name in '{}'", spec)));
    }
    let bump = bump.trim().parse::<BumpType>().map_err(ApiError::InvalidInput)?;
    Ok((name.to_string(), bump))
}
