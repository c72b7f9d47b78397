// husky/src/config.rs

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::{Path, PathBuf}};
use tracing::debug;

use crate::{
    error::HookError,
    hook_name::HookName,
    platform::{OsKind, PlatformContext},
    task::{HookTask, TaskName},
};

pub const WORKSPACE_FILE: &str = ".husky.toml";

/// Merged in order: user -> workspace -> runtime (ephemeral).
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// hook name -> npm script to run
    pub hooks: BTreeMap<String, TaskName>,
    pub install: InstallConfig,
    pub platform: PlatformConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct InstallConfig {
    /// Overwrite hooks this tool did not write.
    pub force: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PlatformConfig {
    pub os: Option<OsKind>,
    pub home: Option<String>,
}

impl Config {
    /// Configured bindings, or every hook with its conventional script when none are set.
    pub fn hook_tasks(&self) -> Result<Vec<HookTask>, HookError> {
        if self.hooks.is_empty() {
            return Ok(HookName::ALL.into_iter().map(HookTask::conventional).collect());
        }
        self.hooks.iter()
            .map(|(h, t)| -> Result<HookTask, HookError> { Ok(HookTask::new(h.parse()?, t.clone())) })
            .collect()
    }

    /// Detected host facts with configured overrides applied.
    pub fn platform_context(&self) -> PlatformContext {
        let mut ctx = PlatformContext::detect();
        if let Some(os) = self.platform.os { ctx = ctx.with_os(os); }
        if let Some(home) = &self.platform.home { ctx = ctx.with_home(home.clone()); }
        ctx
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scope { User, Workspace, Runtime }

fn merge(a: &mut Config, b: &Config) {
    for (k, v) in &b.hooks { a.hooks.insert(k.clone(), v.clone()); }
    a.install.force |= b.install.force;
    if b.platform.os.is_some() { a.platform.os = b.platform.os; }
    if b.platform.home.is_some() { a.platform.home = b.platform.home.clone(); }
}

fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "typicode", "husky").map(|p| p.config_dir().join("config.toml"))
}

#[derive(Clone, Debug)]
pub struct ConfigManager {
    merged: Config,
    user_path: Option<PathBuf>,
    workspace_path: PathBuf,
    runtime_overlay: Config,
}

impl ConfigManager {
    pub fn load(workspace_root: impl AsRef<Path>) -> Result<Self> {
        let workspace_path = workspace_root.as_ref().join(WORKSPACE_FILE);
        Self::with_paths(user_config_path(), workspace_path)
    }

    pub fn with_paths(user_path: Option<PathBuf>, workspace_path: PathBuf) -> Result<Self> {
        let mut me = Self { merged: Config::default(), user_path, workspace_path, runtime_overlay: Config::default() };
        me.reload_all()?;
        Ok(me)
    }

    /// Missing files are empty layers; unreadable or malformed ones are errors.
    fn read_file(path: &Path) -> Result<Option<Config>> {
        if !path.exists() { return Ok(None); }
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg = toml::from_str(&text)
            .map_err(|source| HookError::Config { path: path.to_path_buf(), source })?;
        debug!(path = %path.display(), "loaded config layer");
        Ok(Some(cfg))
    }

    pub fn reload_all(&mut self) -> Result<()> {
        let mut merged = Config::default();
        if let Some(user) = &self.user_path {
            if let Some(usr) = Self::read_file(user)? { merge(&mut merged, &usr); }
        }
        if let Some(ws) = Self::read_file(&self.workspace_path)? { merge(&mut merged, &ws); }
        merge(&mut merged, &self.runtime_overlay);
        self.merged = merged;
        Ok(())
    }

    pub fn get(&self) -> &Config { &self.merged }

    pub fn apply_runtime_overlay(&mut self, patch: Config) -> Result<()> {
        merge(&mut self.runtime_overlay, &patch);
        self.reload_all()
    }

    pub fn write_patch(&mut self, scope: Scope, patch: &Config) -> Result<()> {
        let path = match scope {
            Scope::User => self.user_path.clone().context("no user config directory on this platform")?,
            Scope::Workspace => self.workspace_path.clone(),
            Scope::Runtime => anyhow::bail!("Runtime scope is ephemeral; cannot persist"),
        };
        if let Some(dir) = path.parent() { fs::create_dir_all(dir)?; }
        let mut merged = Self::read_file(&path)?.unwrap_or_default();
        merge(&mut merged, patch);
        let text = toml::to_string_pretty(&merged).context("serialize toml")?;
        fs::write(&path, text).with_context(|| format!("write {}", path.display()))?;
        self.reload_all()
    }
}
