// husky/src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{info, warn};

use husky::{
    git_hooks::{self, InstallOutcome},
    Config, ConfigManager, HookName, OsKind, ScriptRenderer, TaskName, VERSION,
};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Os { Windows, Macos, Linux }

impl From<Os> for OsKind {
    fn from(os: Os) -> Self {
        match os {
            Os::Windows => OsKind::Windows,
            Os::Macos => OsKind::MacOs,
            Os::Linux => OsKind::OtherUnix,
        }
    }
}

#[derive(Parser)]
#[command(name = "husky", version, about = "Git hooks that run npm scripts from package.json")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the hook script to stdout
    Render {
        /// Git hook name, e.g. pre-commit
        hook: String,
        /// Project dir relative to the directory Git runs hooks from
        #[arg(long, default_value = ".")]
        path: String,
        /// npm script to run (default: hook name without dashes)
        #[arg(long)]
        task: Option<String>,
        /// Target OS (default: this host)
        #[arg(long, value_enum)]
        os: Option<Os>,
        /// Home directory baked into the nvm lookup (default: $HOME)
        #[arg(long)]
        home: Option<String>,
    },
    /// Write hook scripts into the repository containing DIR
    Install {
        /// Project directory holding package.json and .husky.toml
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Overwrite hooks not written by husky
        #[arg(long)]
        force: bool,
    },
    /// Remove hook scripts written by husky
    Uninstall {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// List supported hooks and their conventional npm script
    List,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().cmd {
        Cmd::Render { hook, path, task, os, home } => render(hook, path, task, os, home),
        Cmd::Install { dir, force } => install(dir, force),
        Cmd::Uninstall { dir } => uninstall(dir),
        Cmd::List => {
            for hook in HookName::ALL { println!("{hook}\t{}", hook.script_name()); }
            Ok(())
        }
    }
}

fn render(hook: String, path: String, task: Option<String>, os: Option<Os>, home: Option<String>) -> Result<()> {
    let task = match (task, hook.parse::<HookName>()) {
        (Some(t), _) => TaskName::parse(t)?,
        (None, Ok(h)) => TaskName::parse(h.script_name())?,
        (None, Err(_)) => TaskName::parse(hook.replace('-', ""))?,
    };
    if hook.parse::<HookName>().is_err() {
        warn!(%hook, "not a git hook name; rendering anyway");
    }

    let mut cm = ConfigManager::load(".")?;
    let mut patch = Config::default();
    patch.platform.os = os.map(OsKind::from);
    patch.platform.home = home;
    cm.apply_runtime_overlay(patch)?;

    let renderer = ScriptRenderer::new(VERSION, cm.get().platform_context());
    print!("{}", renderer.render(&hook, &path, task.as_str()));
    Ok(())
}

fn install(dir: PathBuf, force: bool) -> Result<()> {
    let mut cm = ConfigManager::load(&dir)?;
    if force {
        let mut patch = Config::default();
        patch.install.force = true;
        cm.apply_runtime_overlay(patch)?;
    }
    let cfg = cm.get();
    let tasks = cfg.hook_tasks()?;
    let layout = git_hooks::locate(&dir)?;
    let renderer = ScriptRenderer::new(VERSION, cfg.platform_context());
    info!(hooks_dir = %layout.hooks_dir.display(), project = %layout.relative_path, "installing hooks");

    let outcomes = git_hooks::install(&layout, &tasks, &renderer, cfg.install.force)?;
    let mut written = 0;
    for o in &outcomes {
        match o {
            InstallOutcome::Written(_) => written += 1,
            InstallOutcome::SkippedForeign(p) => println!("skipped {} (not written by husky; use --force)", p.display()),
        }
    }
    println!("husky > installed {written} hook(s) in {}", layout.hooks_dir.display());
    Ok(())
}

fn uninstall(dir: PathBuf) -> Result<()> {
    let layout = git_hooks::locate(&dir)?;
    let removed = git_hooks::uninstall(&layout)?;
    println!("husky > removed {} hook(s) from {}", removed.len(), layout.hooks_dir.display());
    Ok(())
}
