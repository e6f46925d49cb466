use crate::context::{HookArgs, HookContext};
use crate::error::Result;
use crate::fabric;

/// Package upgrades are left to the package manager; only the filter
/// prerequisites and configuration are refreshed.
pub fn upgrade_charm(ctx: &HookContext<'_>, _args: &HookArgs) -> Result<()> {
    fabric::load_packet_filter(ctx)?;
    fabric::write_all_configs(ctx)
}
