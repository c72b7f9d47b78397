// husky/src/script.rs

//! Renders the `/bin/sh` script Git runs for a hook.
//!
//! The script is assembled from independent fragments, in order:
//! stamp, `command_exists`, `load_nvm`, `has_hook_script`, `cd`, task guard,
//! PATH setup, runner guard, `GIT_PARAMS`, task invocation with its failure branch.

use crate::{
    hook_name::HookName,
    platform::{platform_fragment, PlatformContext},
    task::HookTask,
};

pub const TOOL: &str = "husky";
pub const RUNNER: &str = "npm";
pub const MANIFEST: &str = "package.json";
/// First characters of the version stamp line; marks scripts this crate wrote.
pub const STAMP_PREFIX: &str = "#husky";

/// Ordered list of shell fragments, separated by a blank line when built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptBuilder {
    fragments: Vec<String>,
}

impl ScriptBuilder {
    pub fn new() -> Self { Self { fragments: vec![] } }

    /// Adds a fragment with its source indentation removed. Blank fragments are dropped.
    pub fn push(&mut self, fragment: impl AsRef<str>) -> &mut Self {
        let text = strip_indent(fragment.as_ref());
        if !text.is_empty() { self.fragments.push(text); }
        self
    }

    pub fn fragments(&self) -> &[String] { &self.fragments }

    pub fn build(&self) -> String {
        let mut out = self.fragments.join("\n\n");
        out.push('\n');
        out
    }
}

/// Removes leading/trailing blank lines and the indentation shared by all other lines.
pub fn strip_indent(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else { return String::new() };
    let end = lines.iter().rposition(|l| !l.trim().is_empty()).map_or(start, |i| i + 1);
    let body = &lines[start..end];
    let indent = body.iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);
    body.iter()
        .map(|l| if l.trim().is_empty() { "" } else { l[indent..].trim_end() })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Forward slashes only, no doubled or trailing separators; empty means the current dir.
pub fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars().map(|c| if c == '\\' { '/' } else { c }) {
        if c == '/' && out.ends_with('/') { continue; }
        out.push(c);
    }
    if out.len() > 1 && out.ends_with('/') { out.pop(); }
    if out.is_empty() { ".".to_string() } else { out }
}

pub fn no_verify_message(hook: &str) -> &'static str {
    if hook == HookName::PrepareCommitMsg.as_str() {
        "(cannot be bypassed with --no-verify due to Git specs)"
    } else {
        "(add --no-verify to bypass)"
    }
}

/// Escapes text for use inside a double-quoted shell string.
fn dq(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') { out.push('\\'); }
        out.push(c);
    }
    out
}

fn word(text: &str) -> String { shell_words::quote(text).into_owned() }

pub fn stamp(version: &str) -> String {
    format!("#!/bin/sh\n{STAMP_PREFIX} {version}")
}

pub fn command_exists_fn() -> &'static str {
    r#"
    command_exists () {
      command -v "$1" >/dev/null 2>&1
    }
    "#
}

pub fn load_nvm_fn() -> &'static str {
    r#"
    load_nvm () {
      export $1="$2"
      if ! command_exists nvm && [ -s "$2/nvm.sh" ]; then
        . "$2/nvm.sh"
      fi
      if command_exists nvm && [ -f .nvmrc ]; then
        nvm use
      fi
    }
    "#
}

pub fn has_hook_script_fn() -> &'static str {
    r#"
    has_hook_script () {
      [ -f package.json ] && grep -q "\"$1\"[[:space:]]*:" package.json
    }
    "#
}

pub fn change_dir(relative_path: &str) -> String {
    format!("cd {}", word(&normalize_path(relative_path)))
}

/// A task missing from the manifest (or no manifest at all) is a silent no-op.
pub fn task_guard(task: &str) -> String {
    format!("has_hook_script {} || exit 0", word(task))
}

pub fn runner_guard(task: &str) -> String {
    format!(
        r#"
        command_exists {RUNNER} || {{
          echo >&2 "> {TOOL} - Can't find {RUNNER} in PATH. Skipping {task} script in {MANIFEST}"
          exit 0
        }}
        "#,
        task = dq(task),
    )
}

pub fn expose_params() -> &'static str {
    r#"export GIT_PARAMS="$*""#
}

pub fn run_task(hook: &str, task: &str) -> String {
    format!(
        r#"
        echo
        echo "> {TOOL} - {RUNNER} run -s {task_dq}"
        echo "> {TOOL} - node `node -v`"
        echo
        {RUNNER} run -s {task_word} || {{
          echo
          echo "> {TOOL} - {hook} hook failed {message}"
          echo "> {TOOL} - to debug, use '{RUNNER} run {task_dq}'"
          exit 1
        }}
        "#,
        task_dq = dq(task),
        task_word = word(task),
        hook = dq(hook),
        message = no_verify_message(hook),
    )
}

/// Renders hook scripts for one host. Holds no mutable state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptRenderer {
    version: String,
    platform: PlatformContext,
}

impl ScriptRenderer {
    pub fn new(version: impl Into<String>, platform: PlatformContext) -> Self {
        Self { version: version.into(), platform }
    }

    pub fn version(&self) -> &str { &self.version }
    pub fn platform(&self) -> &PlatformContext { &self.platform }

    /// Fragments for `hook`, in script order.
    pub fn builder(&self, hook: &str, relative_path: &str, task: &str) -> ScriptBuilder {
        let mut b = ScriptBuilder::new();
        b.push(stamp(&self.version))
            .push(command_exists_fn())
            .push(load_nvm_fn())
            .push(has_hook_script_fn())
            .push(change_dir(relative_path))
            .push(task_guard(task))
            .push(platform_fragment(&self.platform).join("\n"))
            .push(runner_guard(task))
            .push(expose_params())
            .push(run_task(hook, task));
        b
    }

    pub fn render(&self, hook: &str, relative_path: &str, task: &str) -> String {
        self.builder(hook, relative_path, task).build()
    }

    pub fn render_task(&self, binding: &HookTask, relative_path: &str) -> String {
        self.render(binding.hook.as_str(), relative_path, binding.task.as_str())
    }
}
