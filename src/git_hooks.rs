// husky/src/git_hooks.rs

use anyhow::{Context, Result};
use git2::Repository;
use std::{fs, path::{Path, PathBuf}};
use tracing::{debug, info, warn};

use crate::{
    error::HookError,
    hook_name::HookName,
    script::{ScriptRenderer, STAMP_PREFIX},
    task::HookTask,
};

/// Where hooks go, and how to reach the project from the directory Git runs them in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HookLayout {
    pub hooks_dir: PathBuf,
    /// Project dir relative to the work tree root, `/`-separated, `.` for the root itself.
    pub relative_path: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstallOutcome {
    Written(PathBuf),
    /// A hook this tool did not write was already there.
    SkippedForeign(PathBuf),
}

pub fn locate(project_dir: &Path) -> Result<HookLayout> {
    let repo = Repository::discover(project_dir)
        .map_err(|_| HookError::NoRepository(project_dir.to_path_buf()))?;
    let workdir = repo.workdir()
        .ok_or_else(|| HookError::BareRepository(repo.path().to_path_buf()))?
        .to_path_buf();

    // core.hooksPath is relative to the work tree when not absolute
    let hooks_dir = match repo.config().and_then(|c| c.get_path("core.hooksPath")) {
        Ok(p) if p.is_absolute() => p,
        Ok(p) => workdir.join(p),
        Err(_) => repo.commondir().join("hooks"),
    };

    let project = project_dir.canonicalize().with_context(|| format!("resolve {}", project_dir.display()))?;
    let root = workdir.canonicalize().with_context(|| format!("resolve {}", workdir.display()))?;
    let rel = project.strip_prefix(&root)
        .map_err(|_| HookError::OutsideWorkTree { project: project.clone(), workdir: root.clone() })?;
    let relative_path = rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    let relative_path = if relative_path.is_empty() { ".".to_string() } else { relative_path };

    debug!(hooks_dir = %hooks_dir.display(), %relative_path, "located git hooks");
    Ok(HookLayout { hooks_dir, relative_path })
}

pub fn is_generated(content: &str) -> bool {
    content.lines().take(3).any(|l| l.starts_with(STAMP_PREFIX))
}

fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_executable(path: &Path, body: &str) -> Result<()> {
    fs::write(path, body).with_context(|| format!("write {}", path.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perm = fs::metadata(path)?.permissions();
        perm.set_mode(0o755);
        fs::set_permissions(path, perm)?;
    }
    Ok(())
}

pub fn install(
    layout: &HookLayout,
    tasks: &[HookTask],
    renderer: &ScriptRenderer,
    force: bool,
) -> Result<Vec<InstallOutcome>> {
    fs::create_dir_all(&layout.hooks_dir)
        .with_context(|| format!("create {}", layout.hooks_dir.display()))?;
    let mut outcomes = Vec::with_capacity(tasks.len());
    for binding in tasks {
        let path = layout.hooks_dir.join(binding.hook.as_str());
        if path.exists() && !force && !is_generated(&read_lossy(&path)?) {
            warn!(hook = %binding.hook, path = %path.display(), "existing hook was not written by husky, skipping");
            outcomes.push(InstallOutcome::SkippedForeign(path));
            continue;
        }
        write_executable(&path, &renderer.render_task(binding, &layout.relative_path))?;
        info!(hook = %binding.hook, task = %binding.task, "installed hook");
        outcomes.push(InstallOutcome::Written(path));
    }
    Ok(outcomes)
}

/// Removes every hook this tool wrote; others are left untouched.
pub fn uninstall(layout: &HookLayout) -> Result<Vec<PathBuf>> {
    let mut removed = vec![];
    for hook in HookName::ALL {
        let path = layout.hooks_dir.join(hook.as_str());
        if !path.is_file() || !is_generated(&read_lossy(&path)?) { continue; }
        fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
        info!(%hook, "removed hook");
        removed.push(path);
    }
    Ok(removed)
}
