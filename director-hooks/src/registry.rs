use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::context::{HookArgs, HookContext};
use crate::error::{HookError, Result};
use crate::handlers;

/// A lifecycle event handler.
pub type HookHandler = fn(&HookContext<'_>, &HookArgs) -> Result<()>;

/// Outcome of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    /// No handler is bound to this event name. Not an error.
    Unhandled(String),
}

/// Collects handlers before the table is frozen.
#[derive(Default)]
pub struct HookRegistryBuilder {
    hooks: BTreeMap<String, HookHandler>,
}

impl HookRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, handler: HookHandler) -> Result<()> {
        if self.hooks.contains_key(name) {
            return Err(HookError::DuplicateRegistration(name.to_string()));
        }
        self.hooks.insert(name.to_string(), handler);
        Ok(())
    }

    pub fn build(self) -> HookRegistry {
        HookRegistry { hooks: self.hooks }
    }
}

/// Immutable event-name to handler table.
pub struct HookRegistry {
    hooks: BTreeMap<String, HookHandler>,
}

impl HookRegistry {
    pub fn builder() -> HookRegistryBuilder {
        HookRegistryBuilder::new()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.hooks.contains_key(name)
    }

    /// Registered event names, sorted.
    pub fn hook_names(&self) -> Vec<&str> {
        self.hooks.keys().map(String::as_str).collect()
    }

    /// Runs the handler bound to `args.name`. Handler errors propagate.
    pub fn dispatch(&self, ctx: &HookContext<'_>, args: &HookArgs) -> Result<Dispatch> {
        let Some(handler) = self.hooks.get(&args.name) else {
            warn!(hook = %args.name, "unknown hook, skipping");
            return Ok(Dispatch::Unhandled(args.name.clone()));
        };
        info!(hook = %args.name, relation_id = ?args.relation_id, "running hook");
        handler(ctx, args)?;
        Ok(Dispatch::Handled)
    }
}

/// The table of every lifecycle event the director unit reacts to.
pub fn default_registry() -> Result<HookRegistry> {
    let mut builder = HookRegistry::builder();
    builder.register("install", handlers::install)?;
    builder.register("director-relation-joined", handlers::director_joined)?;
    builder.register("plumgrid-relation-joined", handlers::plumgrid_joined)?;
    builder.register("config-changed", handlers::config_changed)?;
    builder.register("start", handlers::start)?;
    builder.register("upgrade-charm", handlers::upgrade_charm)?;
    builder.register("stop", handlers::stop)?;
    Ok(builder.build())
}
