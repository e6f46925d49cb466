use std::path::PathBuf;

use crate::error::Result;
use crate::value::ConfigSnapshot;

/// Where the current charm configuration comes from.
pub trait ConfigSource {
    fn load(&self) -> Result<ConfigSnapshot>;
}

/// Reads settings from a YAML mapping, for running hooks outside the agent.
pub struct YamlFileSource {
    path: PathBuf,
}

impl YamlFileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ConfigSource for YamlFileSource {
    fn load(&self) -> Result<ConfigSnapshot> {
        let data = std::fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(ConfigSnapshot::new());
        }
        Ok(serde_yaml::from_str(&data)?)
    }
}
