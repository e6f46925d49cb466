use tracing::info;

use crate::context::{HookArgs, HookContext, SERVICE};
use crate::error::Result;
use crate::fabric;

/// Teardown: the inverse of install. Package removal is best-effort.
pub fn stop(ctx: &HookContext<'_>, _args: &HookArgs) -> Result<()> {
    ctx.services.stop(SERVICE)?;
    fabric::unload_fabric_module(ctx)?;
    fabric::purge_packages(ctx);
    info!("teardown complete");
    Ok(())
}
