pub mod delta;
pub mod error;
pub mod source;
pub mod store;
pub mod value;

// Re-export key types for convenience.
pub use delta::ConfigDelta;
pub use error::{ConfigError, Result};
pub use source::{ConfigSource, YamlFileSource};
pub use store::{JsonSnapshotStore, SnapshotStore, PERSISTENT_CONFIG_FILE};
pub use value::{ConfigSnapshot, ConfigValue};
