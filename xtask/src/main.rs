use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::{io::Write, process::{Command, Stdio}};

use husky::{HookName, OsKind, PlatformContext, ScriptRenderer, VERSION};

#[derive(Parser)]
#[command(name = "xtask", about = "husky workspace tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Render every hook for every OS and run it through `sh -n`
    CheckScripts {
        /// Shell used for the syntax check
        #[arg(long, default_value = "sh")]
        shell: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::CheckScripts { shell } => check_scripts(&shell),
    }
}

fn syntax_ok(shell: &str, script: &str) -> Result<bool> {
    let mut child = Command::new(shell).arg("-n").stdin(Stdio::piped()).spawn()
        .with_context(|| format!("spawn {shell}"))?;
    child.stdin.take().context("stdin")?.write_all(script.as_bytes())?;
    Ok(child.wait()?.success())
}

fn check_scripts(shell: &str) -> Result<()> {
    let mut failed = vec![];
    for os in [OsKind::Windows, OsKind::MacOs, OsKind::OtherUnix] {
        let renderer = ScriptRenderer::new(VERSION, PlatformContext::new(os, Some("/home/dev".into())));
        for hook in HookName::ALL {
            for path in [".", r"packages\web", "with space"] {
                let script = renderer.render(hook.as_str(), path, &hook.script_name());
                if !syntax_ok(shell, &script)? { failed.push(format!("{os:?} {hook} {path}")); }
            }
        }
    }
    if !failed.is_empty() {
        eprintln!("Invalid scripts:");
        for f in failed {
            eprintln!("- {}", f);
        }
        std::process::exit(1);
    }
    println!("OK: all hook scripts parse with {shell} -n");
    Ok(())
}
