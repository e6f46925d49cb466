use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use crate::error::Result;

/// Installs the coordination key that lets the lifecycle manager reach the unit.
pub trait KeyInstaller {
    /// Returns `true` when the key was installed by this call, `false` when
    /// it was already present.
    fn install_key(&self, key: &str) -> Result<bool>;
}

/// An `authorized_keys` file the key is appended to.
pub struct AuthorizedKeys {
    path: PathBuf,
}

impl AuthorizedKeys {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl KeyInstaller for AuthorizedKeys {
    fn install_key(&self, key: &str) -> Result<bool> {
        let key = key.trim();
        let existing = match std::fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        if existing.lines().any(|l| l.trim() == key) {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if !existing.is_empty() && !existing.ends_with('\n') {
            file.write_all(b"\n")?;
        }
        writeln!(file, "{key}")?;
        info!(path = %self.path.display(), "installed coordination key");
        Ok(true)
    }
}
