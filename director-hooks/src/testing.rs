//! Recording stand-in for every capability a handler uses.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::time::Duration;

use director_config::ConfigDelta;
use director_system::{
    FixedRetry, KernelModules, KeyInstaller, LicenseClient, LicenseRequest, NetworkConfigurator,
    PackageManager, RelationChannel, ServiceControl, Sleeper, SystemError,
};

use crate::context::{HookContext, DIRECTOR_RELATION, FABRIC_RELATION};
use crate::render::{ConfigWriter, RenderContext};

const DIRECTOR_RID: &str = "director:1";

/// Mutating calls are logged in order; queries are answered from fixtures
/// and not logged.
pub(crate) struct FakeSystem {
    calls: RefCell<Vec<String>>,
    slept: RefCell<Vec<Duration>>,
    license_results: RefCell<VecDeque<bool>>,
    failing_installs: RefCell<HashSet<String>>,
    failing_purges: RefCell<HashSet<String>>,
    installed_keys: RefCell<HashSet<String>>,
    director_peers: RefCell<Vec<(String, String)>>,
    fabric_relations: RefCell<Vec<String>>,
    recorded_interface: RefCell<Option<String>>,
    last_render: RefCell<Option<RenderContext>>,
    default_interface: String,
    local_address: String,
}

fn scripted_failure(what: &str) -> SystemError {
    SystemError::CommandFailed {
        command: what.to_string(),
        status: Some(100),
        stderr: "scripted failure".to_string(),
    }
}

impl FakeSystem {
    pub(crate) fn new() -> Self {
        Self {
            calls: RefCell::default(),
            slept: RefCell::default(),
            license_results: RefCell::default(),
            failing_installs: RefCell::default(),
            failing_purges: RefCell::default(),
            installed_keys: RefCell::default(),
            director_peers: RefCell::default(),
            fabric_relations: RefCell::default(),
            recorded_interface: RefCell::default(),
            last_render: RefCell::default(),
            default_interface: "eth0".to_string(),
            local_address: "10.0.0.10".to_string(),
        }
    }

    pub(crate) fn context<'a>(&'a self, config: &'a ConfigDelta) -> HookContext<'a> {
        HookContext {
            config,
            packages: self,
            modules: self,
            network: self,
            services: self,
            license: self,
            relations: self,
            keys: self,
            sleeper: self,
            renderer: self,
            license_retry: FixedRetry::default(),
        }
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub(crate) fn slept(&self) -> Vec<Duration> {
        self.slept.borrow().clone()
    }

    /// Results for successive license posts; once used up every post fails.
    pub(crate) fn license_results(&self, results: &[bool]) {
        self.license_results.borrow_mut().extend(results);
    }

    pub(crate) fn fail_install(&self, package: &str) {
        self.failing_installs.borrow_mut().insert(package.to_string());
    }

    pub(crate) fn fail_purge(&self, package: &str) {
        self.failing_purges.borrow_mut().insert(package.to_string());
    }

    pub(crate) fn preinstall_key(&self, key: &str) {
        self.installed_keys.borrow_mut().insert(key.to_string());
    }

    pub(crate) fn add_director_peer(&self, unit: &str, address: &str) {
        self.director_peers
            .borrow_mut()
            .push((unit.to_string(), address.to_string()));
    }

    pub(crate) fn add_fabric_relation(&self, relation_id: &str) {
        self.fabric_relations.borrow_mut().push(relation_id.to_string());
    }

    pub(crate) fn set_recorded_interface(&self, iface: &str) {
        *self.recorded_interface.borrow_mut() = Some(iface.to_string());
    }

    pub(crate) fn last_render(&self) -> Option<RenderContext> {
        self.last_render.borrow().clone()
    }
}

impl PackageManager for FakeSystem {
    fn update_sources(&self) -> director_system::Result<()> {
        self.record("update-sources".to_string());
        Ok(())
    }

    fn install(&self, package: &str, options: &[&str]) -> director_system::Result<()> {
        self.record(format!("install {package} {}", options.join(" ")));
        if self.failing_installs.borrow().contains(package) {
            return Err(scripted_failure(package));
        }
        Ok(())
    }

    fn purge(&self, package: &str) -> director_system::Result<()> {
        self.record(format!("purge {package}"));
        if self.failing_purges.borrow().contains(package) {
            return Err(scripted_failure(package));
        }
        Ok(())
    }
}

impl KernelModules for FakeSystem {
    fn load(&self, module: &str) -> director_system::Result<()> {
        self.record(format!("load {module}"));
        Ok(())
    }

    fn unload(&self, module: &str) -> director_system::Result<()> {
        self.record(format!("unload {module}"));
        Ok(())
    }
}

impl NetworkConfigurator for FakeSystem {
    fn default_route_interface(&self) -> director_system::Result<String> {
        Ok(self.default_interface.clone())
    }

    fn set_mtu(&self, interface: &str, mtu: u32) -> director_system::Result<()> {
        self.record(format!("set-mtu {interface} {mtu}"));
        Ok(())
    }
}

impl ServiceControl for FakeSystem {
    fn stop(&self, service: &str) -> director_system::Result<()> {
        self.record(format!("stop {service}"));
        Ok(())
    }

    fn restart(&self, service: &str) -> director_system::Result<()> {
        self.record(format!("restart {service}"));
        Ok(())
    }
}

impl LicenseClient for FakeSystem {
    fn post_license(&self, request: &LicenseRequest) -> director_system::Result<bool> {
        self.record(format!("post-license {}", request.virtual_ip));
        Ok(self.license_results.borrow_mut().pop_front().unwrap_or(false))
    }
}

impl RelationChannel for FakeSystem {
    fn relation_ids(&self, relation: &str) -> director_system::Result<Vec<String>> {
        Ok(match relation {
            DIRECTOR_RELATION if !self.director_peers.borrow().is_empty() => {
                vec![DIRECTOR_RID.to_string()]
            }
            FABRIC_RELATION => self.fabric_relations.borrow().clone(),
            _ => Vec::new(),
        })
    }

    fn related_units(&self, relation_id: &str) -> director_system::Result<Vec<String>> {
        if relation_id != DIRECTOR_RID {
            return Ok(Vec::new());
        }
        Ok(self
            .director_peers
            .borrow()
            .iter()
            .map(|(unit, _)| unit.clone())
            .collect())
    }

    fn relation_get(
        &self,
        _relation_id: &str,
        unit: &str,
        key: &str,
    ) -> director_system::Result<Option<String>> {
        if key != "private-address" {
            return Ok(None);
        }
        Ok(self
            .director_peers
            .borrow()
            .iter()
            .find(|(u, _)| u == unit)
            .map(|(_, addr)| addr.clone()))
    }

    fn relation_set(
        &self,
        relation_id: Option<&str>,
        settings: &[(&str, &str)],
    ) -> director_system::Result<()> {
        let pairs: Vec<String> = settings.iter().map(|(k, v)| format!("{k}={v}")).collect();
        self.record(format!(
            "relation-set {} {}",
            relation_id.unwrap_or("<current>"),
            pairs.join(" ")
        ));
        Ok(())
    }

    fn local_address(&self) -> director_system::Result<String> {
        Ok(self.local_address.clone())
    }
}

impl KeyInstaller for FakeSystem {
    fn install_key(&self, key: &str) -> director_system::Result<bool> {
        self.record(format!("install-key {key}"));
        Ok(self.installed_keys.borrow_mut().insert(key.to_string()))
    }
}

impl Sleeper for FakeSystem {
    fn sleep(&self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}

impl ConfigWriter for FakeSystem {
    fn write_all(&self, ctx: &RenderContext) -> crate::error::Result<Vec<PathBuf>> {
        self.record("write-configs".to_string());
        *self.recorded_interface.borrow_mut() = Some(ctx.fabric_interface.clone());
        *self.last_render.borrow_mut() = Some(ctx.clone());
        Ok(Vec::new())
    }

    fn recorded_fabric_interface(&self) -> crate::error::Result<Option<String>> {
        Ok(self.recorded_interface.borrow().clone())
    }
}
