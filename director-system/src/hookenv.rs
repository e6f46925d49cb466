//! Access to the agent's hook tools (`config-get`, `relation-*`, `unit-get`).

use director_config::{ConfigError, ConfigSnapshot, ConfigSource};
use tracing::{debug, info};

use crate::error::Result;
use crate::process::{CommandRunner, CommandSpec};

/// Key/value exchange with units on the other side of a relation.
pub trait RelationChannel {
    /// Ids of every established relation with the given name.
    fn relation_ids(&self, relation: &str) -> Result<Vec<String>>;
    /// Remote units joined on a relation.
    fn related_units(&self, relation_id: &str) -> Result<Vec<String>>;
    fn relation_get(&self, relation_id: &str, unit: &str, key: &str) -> Result<Option<String>>;
    /// Publish settings on a relation. `None` targets the relation of the
    /// running hook. Fire-and-forget: there is no acknowledgement.
    fn relation_set(&self, relation_id: Option<&str>, settings: &[(&str, &str)]) -> Result<()>;
    /// This unit's private address.
    fn local_address(&self) -> Result<String>;
}

/// Hook tools invoked as commands.
pub struct HookTools<R> {
    runner: R,
}

impl<R: CommandRunner> HookTools<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> RelationChannel for HookTools<R> {
    fn relation_ids(&self, relation: &str) -> Result<Vec<String>> {
        let out = self.runner.run(&CommandSpec::new("relation-ids").arg(relation))?;
        Ok(out.lines().map(ToString::to_string).collect())
    }

    fn related_units(&self, relation_id: &str) -> Result<Vec<String>> {
        let out = self
            .runner
            .run(&CommandSpec::new("relation-list").args(["-r", relation_id]))?;
        Ok(out.lines().map(ToString::to_string).collect())
    }

    fn relation_get(&self, relation_id: &str, unit: &str, key: &str) -> Result<Option<String>> {
        let out = self
            .runner
            .run(&CommandSpec::new("relation-get").args(["-r", relation_id, key, unit]))?;
        let value = out.stdout.trim();
        Ok((!value.is_empty()).then(|| value.to_string()))
    }

    fn relation_set(&self, relation_id: Option<&str>, settings: &[(&str, &str)]) -> Result<()> {
        let mut cmd = CommandSpec::new("relation-set");
        if let Some(rid) = relation_id {
            cmd = cmd.args(["-r", rid]);
        }
        cmd = cmd.args(settings.iter().map(|(k, v)| format!("{k}={v}")));
        info!(relation_id = relation_id.unwrap_or("<current>"), "publishing relation data");
        self.runner.run(&cmd)?;
        Ok(())
    }

    fn local_address(&self) -> Result<String> {
        let out = self
            .runner
            .run(&CommandSpec::new("unit-get").arg("private-address"))?;
        Ok(out.stdout.trim().to_string())
    }
}

impl<R: CommandRunner> ConfigSource for HookTools<R> {
    fn load(&self) -> director_config::Result<ConfigSnapshot> {
        let cmd = CommandSpec::new("config-get").args(["--all", "--format=json"]);
        let out = self
            .runner
            .run(&cmd)
            .map_err(|e| ConfigError::Source(e.to_string()))?;
        let snapshot: ConfigSnapshot = serde_json::from_str(&out.stdout)?;
        debug!(keys = snapshot.len(), "loaded charm config");
        Ok(snapshot)
    }
}
