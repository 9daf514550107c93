//! Shared test utilities for integration tests
//!
//! Temporary workspaces with `package.json` packages and changeset files, a helper
//! that runs CLI commands against them, and serialized access to the environment
//! variables that configuration loading reads.

use changegen::cli::{Cli, RunContext};
use changegen::config::ChangegenConfig;
use changegen::error::ApiError;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_VARS: &[&str] = &["HOME", "XDG_CONFIG_HOME", "CHANGEGEN_ENV"];

/// A temporary workspace
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `<dir>/package.json` for a package.
    pub fn package(&self, dir: &str, name: &str, version: &str, dependencies: &[(&str, &str)]) -> &Self {
        let mut manifest = serde_json::Map::new();
        manifest.insert("name".into(), name.into());
        manifest.insert("version".into(), version.into());
        if !dependencies.is_empty() {
            let deps: serde_json::Map<String, serde_json::Value> = dependencies
                .iter()
                .map(|(n, s)| (n.to_string(), serde_json::Value::from(*s)))
                .collect();
            manifest.insert("dependencies".into(), deps.into());
        }
        let text = serde_json::to_string_pretty(&serde_json::Value::Object(manifest)).unwrap();
        self.write(&format!("{}/package.json", dir), &format!("{}\n", text))
    }

    pub fn changeset(&self, id: &str, text: &str) -> &Self {
        self.write(&format!(".changeset/{}.md", id), text)
    }

    pub fn write(&self, relative: &str, text: &str) -> &Self {
        let path = self.path(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, text).unwrap();
        self
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).unwrap()
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    pub fn changeset_files(&self) -> Vec<String> {
        let dir = self.path(".changeset");
        if !dir.is_dir() {
            return Vec::new();
        }
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n.ends_with(".md") && n != "README.md")
            .collect();
        names.sort();
        names
    }

    pub fn context(&self) -> RunContext {
        self.context_with(ChangegenConfig::default())
    }

    pub fn context_with(&self, config: ChangegenConfig) -> RunContext {
        RunContext::with_config(self.root().to_path_buf(), config)
    }

    /// Run `changegen <args>` with the default configuration.
    pub fn run(&self, args: &[&str]) -> Result<String, ApiError> {
        self.run_with(ChangegenConfig::default(), args)
    }

    pub fn run_with(&self, config: ChangegenConfig, args: &[&str]) -> Result<String, ApiError> {
        let cli = Cli::try_parse_from(std::iter::once("changegen").chain(args.iter().copied())).unwrap();
        self.context_with(config).execute(&cli.command)
    }
}

/// Three packages: `@acme/core`, `@acme/tree` (depends on core) and `app`
/// (depends on tree through `workspace:*`).
pub fn acme_workspace() -> TestWorkspace {
    let ws = TestWorkspace::new();
    ws.write("package.json", "{ \"name\": \"acme-root\", \"private\": true, \"version\": \"0.0.0\" }\n")
        .package("packages/core", "@acme/core", "2.1.0", &[])
        .package("packages/tree", "@acme/tree", "2.1.0", &[("@acme/core", "~2.1.0")])
        .package("apps/app", "app", "0.4.2", &[("@acme/tree", "workspace:*")]);
    ws
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointed into `test_dir` and the given
/// extra variables set; the previous environment is restored afterwards.
pub fn with_isolated_env<F, R>(test_dir: &TempDir, vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let mut names: Vec<String> = ENV_VARS.iter().map(|s| s.to_string()).collect();
    names.extend(vars.iter().map(|(k, _)| k.to_string()));
    let saved: Vec<(String, Option<String>)> = names
        .iter()
        .map(|name| (name.clone(), std::env::var(name).ok()))
        .collect();

    let home = test_dir.path().join("home");
    let config_home = test_dir.path().join("config");
    std::fs::create_dir_all(&home).unwrap();
    std::fs::create_dir_all(&config_home).unwrap();
    std::env::set_var("HOME", &home);
    std::env::set_var("XDG_CONFIG_HOME", &config_home);
    std::env::remove_var("CHANGEGEN_ENV");
    for (key, value) in vars {
        std::env::set_var(key, value);
    }

    let result = f();

    for (name, value) in saved {
        match value {
            Some(v) => std::env::set_var(&name, v),
            None => std::env::remove_var(&name),
        }
    }
    result
}
