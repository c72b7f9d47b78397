// husky/src/task.rs

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::LazyLock};

use crate::{error::HookError, hook_name::HookName};

static TASK_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.:+@/-]*$").expect("static regex"));

/// An npm script name that is safe to splice into shell command text.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskName(String);

impl TaskName {
    pub fn parse(name: impl Into<String>) -> Result<Self, HookError> {
        let name = name.into();
        if TASK_NAME.is_match(&name) { Ok(Self(name)) } else { Err(HookError::InvalidTaskName(name)) }
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl TryFrom<String> for TaskName {
    type Error = HookError;
    fn try_from(s: String) -> Result<Self, Self::Error> { Self::parse(s) }
}

impl From<TaskName> for String {
    fn from(t: TaskName) -> Self { t.0 }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// Which task a given hook runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HookTask {
    pub hook: HookName,
    pub task: TaskName,
}

impl HookTask {
    pub fn new(hook: HookName, task: TaskName) -> Self { Self { hook, task } }

    /// Binds a hook to its dash-less script name, e.g. `pre-push` -> `prepush`.
    pub fn conventional(hook: HookName) -> Self {
        // script names are lowercase letters only
        Self { hook, task: TaskName(hook.script_name()) }
    }
}
