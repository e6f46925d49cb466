use director_config::{ConfigDelta, ConfigSnapshot};
use director_system::{
    FixedRetry, KernelModules, KeyInstaller, LicenseClient, NetworkConfigurator, PackageManager,
    RelationChannel, ServiceControl, Sleeper,
};

use crate::render::ConfigWriter;

/// The fabric service name.
pub const SERVICE: &str = "plumgrid";

/// The fabric kernel module.
pub const FABRIC_MODULE: &str = "iovisor";

/// Kernel modules the packet filter needs before anything else is installed.
pub const PACKET_FILTER_MODULES: &[&str] = &["ip_tables", "ip6_tables"];

/// Relation name of the fabric peers (edge and gateway units).
pub const FABRIC_RELATION: &str = "plumgrid";

/// Relation name of the other directors.
pub const DIRECTOR_RELATION: &str = "director";

/// One incoming lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookArgs {
    pub name: String,
    pub relation_id: Option<String>,
}

impl HookArgs {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            relation_id: None,
        }
    }

    pub fn with_relation(mut self, relation_id: &str) -> Self {
        self.relation_id = Some(relation_id.to_string());
        self
    }
}

/// Everything a handler may touch during one dispatch.
///
/// The configuration is read-only for the whole invocation.
pub struct HookContext<'a> {
    pub config: &'a ConfigDelta,
    pub packages: &'a dyn PackageManager,
    pub modules: &'a dyn KernelModules,
    pub network: &'a dyn NetworkConfigurator,
    pub services: &'a dyn ServiceControl,
    pub license: &'a dyn LicenseClient,
    pub relations: &'a dyn RelationChannel,
    pub keys: &'a dyn KeyInstaller,
    pub sleeper: &'a dyn Sleeper,
    pub renderer: &'a dyn ConfigWriter,
    pub license_retry: FixedRetry,
}

impl HookContext<'_> {
    pub fn settings(&self) -> &ConfigSnapshot {
        self.config.current()
    }
}
