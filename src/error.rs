// husky/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookError {
    #[error("unknown git hook '{0}'")]
    UnknownHook(String),

    /// Task names end up in shell command positions, so only plain tokens are accepted.
    #[error("invalid task name '{0}': use letters, digits and _ . : + @ / -")]
    InvalidTaskName(String),

    #[error("no git repository found at or above {0}")]
    NoRepository(PathBuf),

    #[error("git repository at {0} is bare; hooks need a work tree")]
    BareRepository(PathBuf),

    #[error("{project} is not inside the work tree {workdir}")]
    OutsideWorkTree { project: PathBuf, workdir: PathBuf },

    #[error("invalid config {path}: {source}")]
    Config { path: PathBuf, #[source] source: toml::de::Error },
}
