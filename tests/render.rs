use husky::{HookName, OsKind, PlatformContext, ScriptRenderer};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const LINUX_PRE_COMMIT: &str = r#"#!/bin/sh
#husky 1.2.3

command_exists () {
  command -v "$1" >/dev/null 2>&1
}

load_nvm () {
  export $1="$2"
  if ! command_exists nvm && [ -s "$2/nvm.sh" ]; then
    . "$2/nvm.sh"
  fi
  if command_exists nvm && [ -f .nvmrc ]; then
    nvm use
  fi
}

has_hook_script () {
  [ -f package.json ] && grep -q "\"$1\"[[:space:]]*:" package.json
}

cd client

has_hook_script lint || exit 0

export PATH=$PATH:/usr/local/bin:/usr/local
load_nvm NVM_DIR /home/u/.nvm

command_exists npm || {
  echo >&2 "> husky - Can't find npm in PATH. Skipping lint script in package.json"
  exit 0
}

export GIT_PARAMS="$*"

echo
echo "> husky - npm run -s lint"
echo "> husky - node `node -v`"
echo
npm run -s lint || {
  echo
  echo "> husky - pre-commit hook failed (add --no-verify to bypass)"
  echo "> husky - to debug, use 'npm run lint'"
  exit 1
}
"#;

fn renderer(os: OsKind) -> ScriptRenderer {
    ScriptRenderer::new("1.2.3", PlatformContext::new(os, Some("/home/u".into())))
}

fn nvm_invocations(script: &str) -> usize {
    script.lines().filter(|l| l.starts_with("load_nvm ") && !l.starts_with("load_nvm ()")).count()
}

#[test]
fn renders_linux_pre_commit() {
    assert_eq!(renderer(OsKind::OtherUnix).render("pre-commit", "client", "lint"), LINUX_PRE_COMMIT);
}

#[test]
fn prepare_commit_msg_mentions_git_specs() {
    let script = renderer(OsKind::OtherUnix).render("prepare-commit-msg", ".", "msg");
    assert!(script.contains(
        r#"echo "> husky - prepare-commit-msg hook failed (cannot be bypassed with --no-verify due to Git specs)""#
    ));
    assert!(!script.contains("(add --no-verify to bypass)"));
}

#[test]
fn every_other_hook_gets_the_generic_hint() {
    let r = renderer(OsKind::OtherUnix);
    for hook in HookName::ALL.into_iter().filter(|h| *h != HookName::PrepareCommitMsg) {
        let script = r.render(hook.as_str(), ".", &hook.script_name());
        assert!(script.contains(&format!("husky - {hook} hook failed (add --no-verify to bypass)")), "{hook}");
    }
}

#[test]
fn nvm_wiring_depends_on_os() {
    let win = renderer(OsKind::Windows).render("pre-push", ".", "test");
    assert_eq!(nvm_invocations(&win), 0);
    assert!(win.contains("export PATH=\"$PATH:/c/Program Files/nodejs\"\n"));
    assert!(!win.contains("NVM_DIR"));

    let mac = renderer(OsKind::MacOs).render("pre-push", ".", "test");
    assert_eq!(nvm_invocations(&mac), 2);
    assert!(mac.contains("load_nvm BREW_NVM_DIR /usr/local/opt/nvm\nload_nvm NVM_DIR /home/u/.nvm\n"));

    let linux = renderer(OsKind::OtherUnix).render("pre-push", ".", "test");
    assert_eq!(nvm_invocations(&linux), 1);
}

#[test]
fn backslash_paths_render_with_forward_slashes() {
    for os in [OsKind::Windows, OsKind::MacOs, OsKind::OtherUnix] {
        let script = renderer(os).render("pre-commit", r"packages\web\client", "lint");
        assert!(script.contains("cd packages/web/client\n"));
        assert!(!script.lines().any(|l| l.starts_with("cd ") && l.contains('\\')));
    }
}

#[test]
fn missing_home_renders_inert_nvm_line() {
    let r = ScriptRenderer::new("1.2.3", PlatformContext::new(OsKind::OtherUnix, None));
    assert!(r.render("pre-commit", ".", "lint").contains("\nload_nvm NVM_DIR /.nvm\n"));
}

#[cfg(unix)]
#[test]
fn every_variant_passes_sh_syntax_check() {
    use std::io::Write;
    use std::process::{Command, Stdio};

    for os in [OsKind::Windows, OsKind::MacOs, OsKind::OtherUnix] {
        for hook in HookName::ALL {
            let script = renderer(os).render(hook.as_str(), "my app", &hook.script_name());
            let mut child = Command::new("sh").arg("-n").stdin(Stdio::piped()).spawn().unwrap();
            child.stdin.take().unwrap().write_all(script.as_bytes()).unwrap();
            assert!(child.wait().unwrap().success(), "{os:?} {hook}\n{script}");
        }
    }
}

fn os_kind() -> impl Strategy<Value = OsKind> {
    prop_oneof![Just(OsKind::Windows), Just(OsKind::MacOs), Just(OsKind::OtherUnix)]
}

proptest! {
    #[test]
    fn rendering_is_deterministic(
        os in os_kind(),
        hook in "[a-z]{1,8}(-[a-z]{1,8}){0,2}",
        path in r"[a-z]{1,6}([/\\][a-z]{1,6}){0,3}",
        task in "[a-z][a-z0-9:_-]{0,12}",
    ) {
        let a = renderer(os).render(&hook, &path, &task);
        let b = renderer(os).render(&hook, &path, &task);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn cd_line_never_contains_backslashes(path in r"[a-z]{1,6}(\\{1,2}[a-z]{1,6}){1,3}\\?") {
        let script = renderer(OsKind::Windows).render("pre-commit", &path, "lint");
        let cd = script.lines().find(|l| l.starts_with("cd ")).unwrap();
        prop_assert!(!cd.contains('\\'));
        prop_assert!(!cd.ends_with('/'));
    }

    #[test]
    fn no_template_indentation_leaks(os in os_kind(), task in "[a-z][a-z0-9:_-]{0,12}") {
        let script = renderer(os).render("pre-commit", "client", &task);
        for line in script.lines() {
            let indent = line.len() - line.trim_start().len();
            prop_assert!(indent <= 4, "over-indented line: {:?}", line);
            prop_assert!(indent % 2 == 0, "odd indentation: {:?}", line);
        }
        for top in ["#!/bin/sh", "cd client", "export GIT_PARAMS=\"$*\"", "command_exists () {", "load_nvm () {", "has_hook_script () {"] {
            prop_assert!(script.lines().any(|l| l == top), "missing top-level line {:?}", top);
        }
    }
}
