pub mod error;
pub mod hook_name;
pub mod task;
pub mod platform;
pub mod script;
pub mod config;
pub mod git_hooks;

pub use error::HookError;
pub use hook_name::HookName;
pub use task::{HookTask, TaskName};
pub use platform::{OsKind, PlatformContext, platform_fragment};
pub use script::{ScriptBuilder, ScriptRenderer};
pub use config::{Config, ConfigManager, Scope};
pub use git_hooks::{HookLayout, InstallOutcome};

/// Version stamped into every generated script.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
