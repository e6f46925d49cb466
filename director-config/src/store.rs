use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::value::ConfigSnapshot;

/// File name the previous configuration is kept under, relative to the charm dir.
pub const PERSISTENT_CONFIG_FILE: &str = ".juju-persistent-config";

/// Trait for previous-snapshot storage backends.
pub trait SnapshotStore {
    /// Returns `None` when no snapshot was ever saved.
    fn load(&self) -> Result<Option<ConfigSnapshot>>;
    fn save(&self, snapshot: &ConfigSnapshot) -> Result<()>;
}

/// JSON file-based snapshot store.
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store located at the conventional path inside `charm_dir`.
    pub fn in_charm_dir(charm_dir: &Path) -> Self {
        Self::new(charm_dir.join(PERSISTENT_CONFIG_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> Result<Option<ConfigSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn save(&self, snapshot: &ConfigSnapshot) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, snapshot)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        debug!(path = %self.path.display(), keys = snapshot.len(), "saved config snapshot");
        Ok(())
    }
}
