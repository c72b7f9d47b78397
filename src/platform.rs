// husky/src/platform.rs

use serde::{Deserialize, Serialize};

/// Node's default install location, for GUI Git clients that don't inherit the shell profile.
pub const WINDOWS_NODE_PATH: &str = r#"export PATH="$PATH:/c/Program Files/nodejs""#;
/// Homebrew bin dir and Node's default prefix.
pub const UNIX_NODE_PATH: &str = "export PATH=$PATH:/usr/local/bin:/usr/local";
pub const BREW_NVM_DIR: (&str, &str) = ("BREW_NVM_DIR", "/usr/local/opt/nvm");
pub const NVM_DIR_VAR: &str = "NVM_DIR";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OsKind { Windows, MacOs, OtherUnix }

impl OsKind {
    pub fn current() -> Self { Self::from_target(std::env::consts::OS) }

    /// Maps a `std::env::consts::OS` value.
    pub fn from_target(os: &str) -> Self {
        match os {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            _ => Self::OtherUnix,
        }
    }
}

/// Host facts the generated script depends on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformContext {
    pub os: OsKind,
    pub home: Option<String>,
}

impl PlatformContext {
    pub fn new(os: OsKind, home: Option<String>) -> Self { Self { os, home } }

    /// `~` does not expand inside hooks, so `$HOME` is resolved now and baked in.
    pub fn detect() -> Self {
        Self { os: OsKind::current(), home: std::env::var("HOME").ok() }
    }

    pub fn with_os(mut self, os: OsKind) -> Self { self.os = os; self }
    pub fn with_home(mut self, home: impl Into<String>) -> Self { self.home = Some(home.into()); self }
}

pub fn load_nvm_call(var: &str, dir: &str) -> String {
    format!("load_nvm {var} {}", shell_words::quote(dir))
}

/// PATH setup statements, one per element, in execution order.
pub fn platform_fragment(ctx: &PlatformContext) -> Vec<String> {
    if ctx.os == OsKind::Windows {
        return vec![WINDOWS_NODE_PATH.to_string()];
    }
    let home = ctx.home.as_deref().unwrap_or_default();
    let mut lines = vec![UNIX_NODE_PATH.to_string()];
    if ctx.os == OsKind::MacOs {
        lines.push(load_nvm_call(BREW_NVM_DIR.0, BREW_NVM_DIR.1));
    }
    lines.push(load_nvm_call(NVM_DIR_VAR, &format!("{home}/.nvm")));
    lines
}
