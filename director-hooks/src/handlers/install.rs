use tracing::info;

use crate::context::{HookArgs, HookContext};
use crate::error::Result;
use crate::fabric;

/// Runs once when the unit is first provisioned. Module load and MTU need
/// binaries from the packages, so they come after installation.
pub fn install(ctx: &HookContext<'_>, _args: &HookArgs) -> Result<()> {
    fabric::load_packet_filter(ctx)?;
    ctx.packages.update_sources()?;
    fabric::install_packages(ctx)?;
    fabric::load_fabric_module(ctx)?;
    fabric::ensure_mtu(ctx)?;
    fabric::write_all_configs(ctx)?;
    info!("install complete");
    Ok(())
}
