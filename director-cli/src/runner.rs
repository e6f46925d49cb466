use anyhow::Context;
use director_config::{
    ConfigDelta, ConfigSnapshot, ConfigSource, JsonSnapshotStore, SnapshotStore, YamlFileSource,
};
use director_hooks::{
    default_registry, ConfigRenderer, Dispatch, FabricLayout, HookArgs, HookContext, HookRegistry,
};
use director_system::{
    Apt, AuthorizedKeys, DirectorApi, FixedRetry, HookTools, IpRoute2, Modprobe, Systemctl,
    SystemRunner, ThreadSleeper,
};
use tracing::{debug, info, warn};

use crate::cli_args::AgentSettings;

fn load_config(settings: &AgentSettings) -> anyhow::Result<ConfigSnapshot> {
    let snapshot = match &settings.config_file {
        Some(path) => YamlFileSource::new(path.clone())
            .load()
            .with_context(|| format!("reading config file {}", path.display()))?,
        None => HookTools::new(SystemRunner)
            .load()
            .context("reading charm config")?,
    };
    Ok(snapshot)
}

/// Runs one lifecycle event against the real system.
///
/// The config snapshot is only persisted once a registered handler has
/// finished without error, so a failed event sees the same change set when
/// it is retried.
pub fn run_hook(
    registry: &HookRegistry,
    settings: &AgentSettings,
    hook: &str,
) -> anyhow::Result<Dispatch> {
    if !registry.contains(hook) {
        warn!(hook, "unknown hook, skipping");
        return Ok(Dispatch::Unhandled(hook.to_string()));
    }

    let store = JsonSnapshotStore::in_charm_dir(&settings.charm_dir);
    let previous = store
        .load()
        .with_context(|| format!("reading {}", store.path().display()))?;
    let delta = ConfigDelta::new(previous, load_config(settings)?);
    debug!(changed = ?delta.changed_keys(), "config delta");

    let layout = FabricLayout::new(&settings.root);
    let renderer = ConfigRenderer::new(layout.clone());
    let packages = Apt::new(SystemRunner);
    let modules = Modprobe::new(SystemRunner);
    let network = IpRoute2::new(SystemRunner);
    let services = Systemctl::new(SystemRunner);
    let license = DirectorApi::new()?;
    let relations = HookTools::new(SystemRunner);
    let keys = AuthorizedKeys::new(layout.lcm_authorized_keys());

    let ctx = HookContext {
        config: &delta,
        packages: &packages,
        modules: &modules,
        network: &network,
        services: &services,
        license: &license,
        relations: &relations,
        keys: &keys,
        sleeper: &ThreadSleeper,
        renderer: &renderer,
        license_retry: FixedRetry::default(),
    };

    let mut args = HookArgs::new(hook);
    args.relation_id.clone_from(&settings.relation_id);

    let outcome = registry
        .dispatch(&ctx, &args)
        .with_context(|| format!("hook {hook} failed"))?;
    if outcome == Dispatch::Handled {
        store
            .save(delta.current())
            .with_context(|| format!("writing {}", store.path().display()))?;
        info!(hook, "hook complete");
    }
    Ok(outcome)
}

/// Builds the registry and resolves the event name before dispatching.
pub fn run(settings: &AgentSettings, argv0: &str) -> anyhow::Result<Dispatch> {
    let registry = default_registry()?;
    let hook = settings.hook_name(argv0)?;
    run_hook(&registry, settings, &hook)
}
