use std::path::{Path, PathBuf};

use clap::Parser;

/// Name the binary is installed under. Hook symlinks carry the event name
/// instead.
pub const BIN_NAME: &str = "pg-dir-hooks";

#[derive(Debug, Clone, Parser)]
#[command(name = BIN_NAME)]
#[command(about = "Lifecycle hooks for the PLUMgrid director unit", long_about = None)]
#[command(version)]
pub struct AgentSettings {
    /// Lifecycle event to run. Defaults to the name the binary was invoked as.
    pub hook: Option<String>,

    /// Relation the event fired on, for relation hooks
    #[arg(long, env = "JUJU_RELATION_ID")]
    pub relation_id: Option<String>,

    /// Charm directory; the previous config snapshot is kept here
    #[arg(long, env = "CHARM_DIR", default_value = ".")]
    pub charm_dir: PathBuf,

    /// Filesystem root managed files are rendered under
    #[arg(long, env = "PG_DIR_ROOT", default_value = "/")]
    pub root: PathBuf,

    /// Read charm config from this YAML file instead of `config-get`
    #[arg(long)]
    pub config_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "PG_DIR_LOG", default_value = "info")]
    pub log_level: String,

    /// Print the registered hook names and exit
    #[arg(long)]
    pub list: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgsError {
    #[error("no hook name given and {0:?} is not a hook name")]
    MissingHook(String),
}

impl AgentSettings {
    /// The event to dispatch: the positional argument, else the basename of
    /// `argv0`.
    pub fn hook_name(&self, argv0: &str) -> Result<String, ArgsError> {
        if let Some(hook) = self.hook.as_deref().map(str::trim).filter(|h| !h.is_empty()) {
            return Ok(hook.to_string());
        }
        let invoked = Path::new(argv0)
            .file_name()
            .and_then(std::ffi::OsStr::to_str)
            .unwrap_or_default();
        if invoked.is_empty() || invoked == BIN_NAME {
            return Err(ArgsError::MissingHook(argv0.to_string()));
        }
        Ok(invoked.to_string())
    }
}
