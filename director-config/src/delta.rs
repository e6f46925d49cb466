use crate::value::ConfigSnapshot;

/// Previous/current pair of configuration snapshots for one hook invocation.
///
/// When the unit has never persisted a snapshot every key reports as changed,
/// so the first `config-changed` after install always reconfigures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDelta {
    previous: Option<ConfigSnapshot>,
    current: ConfigSnapshot,
}

impl ConfigDelta {
    pub fn new(previous: Option<ConfigSnapshot>, current: ConfigSnapshot) -> Self {
        Self { previous, current }
    }

    /// A delta with no history, as seen on a freshly provisioned unit.
    pub fn first_run(current: ConfigSnapshot) -> Self {
        Self::new(None, current)
    }

    pub fn changed(&self, key: &str) -> bool {
        match &self.previous {
            None => true,
            Some(prev) => prev.get(key) != self.current.get(key),
        }
    }

    pub fn current(&self) -> &ConfigSnapshot {
        &self.current
    }

    /// Keys whose value differs between the two snapshots, sorted.
    pub fn changed_keys(&self) -> Vec<&str> {
        let Some(prev) = &self.previous else {
            return self.current.iter().map(|(k, _)| k).collect();
        };
        let mut keys: Vec<&str> = self
            .current
            .iter()
            .map(|(k, _)| k)
            .chain(prev.iter().map(|(k, _)| k))
            .filter(|k| self.changed(k))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }
}
