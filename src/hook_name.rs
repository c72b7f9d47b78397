// husky/src/hook_name.rs

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::HookError;

/// Git lifecycle hooks a script can be generated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookName {
    ApplypatchMsg,
    PreApplypatch,
    PostApplypatch,
    PreCommit,
    PrepareCommitMsg,
    CommitMsg,
    PostCommit,
    PreRebase,
    PostCheckout,
    PostMerge,
    PrePush,
    PreReceive,
    Update,
    PostReceive,
    PostUpdate,
    PushToCheckout,
    PreAutoGc,
    PostRewrite,
    SendemailValidate,
}

impl HookName {
    pub const ALL: [HookName; 19] = [
        Self::ApplypatchMsg, Self::PreApplypatch, Self::PostApplypatch, Self::PreCommit,
        Self::PrepareCommitMsg, Self::CommitMsg, Self::PostCommit, Self::PreRebase,
        Self::PostCheckout, Self::PostMerge, Self::PrePush, Self::PreReceive, Self::Update,
        Self::PostReceive, Self::PostUpdate, Self::PushToCheckout, Self::PreAutoGc,
        Self::PostRewrite, Self::SendemailValidate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApplypatchMsg => "applypatch-msg",
            Self::PreApplypatch => "pre-applypatch",
            Self::PostApplypatch => "post-applypatch",
            Self::PreCommit => "pre-commit",
            Self::PrepareCommitMsg => "prepare-commit-msg",
            Self::CommitMsg => "commit-msg",
            Self::PostCommit => "post-commit",
            Self::PreRebase => "pre-rebase",
            Self::PostCheckout => "post-checkout",
            Self::PostMerge => "post-merge",
            Self::PrePush => "pre-push",
            Self::PreReceive => "pre-receive",
            Self::Update => "update",
            Self::PostReceive => "post-receive",
            Self::PostUpdate => "post-update",
            Self::PushToCheckout => "push-to-checkout",
            Self::PreAutoGc => "pre-auto-gc",
            Self::PostRewrite => "post-rewrite",
            Self::SendemailValidate => "sendemail-validate",
        }
    }

    /// Conventional npm script for this hook: the hook name without dashes (`precommit`).
    pub fn script_name(&self) -> String { self.as_str().replace('-', "") }

    /// Git runs `prepare-commit-msg` even under `--no-verify`.
    pub fn can_bypass(&self) -> bool { !matches!(self, Self::PrepareCommitMsg) }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for HookName {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter()
            .copied()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| HookError::UnknownHook(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_name_it_prints() {
        for hook in HookName::ALL {
            assert_eq!(hook.as_str().parse::<HookName>().unwrap(), hook);
        }
    }

    #[test]
    fn rejects_unknown_hooks() {
        let err = "pre-comit".parse::<HookName>().unwrap_err();
        assert!(matches!(err, HookError::UnknownHook(ref n) if n == "pre-comit"));
    }

    #[test]
    fn script_name_drops_dashes() {
        assert_eq!(HookName::PreCommit.script_name(), "precommit");
        assert_eq!(HookName::PrepareCommitMsg.script_name(), "preparecommitmsg");
        assert_eq!(HookName::Update.script_name(), "update");
    }

    #[test]
    fn only_prepare_commit_msg_is_unbypassable() {
        let fixed: Vec<_> = HookName::ALL.iter().filter(|h| !h.can_bypass()).collect();
        assert_eq!(fixed, vec![&HookName::PrepareCommitMsg]);
    }

    #[test]
    fn serde_uses_kebab_case() {
        #[derive(Deserialize)]
        struct Wrap { hook: HookName }
        let w: Wrap = toml::from_str("hook = \"pre-auto-gc\"").unwrap();
        assert_eq!(w.hook, HookName::PreAutoGc);
    }
}
