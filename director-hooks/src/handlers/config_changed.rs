use tracing::{info, warn};

use crate::context::{HookArgs, HookContext, FABRIC_RELATION, SERVICE};
use crate::error::Result;
use crate::fabric;
use crate::handlers::relation::{FabricPeer, PeerAnnouncement};

/// Reacts to configuration changes. Each early return avoids disrupting the
/// fabric service for a change that does not need a full reconfiguration.
pub fn config_changed(ctx: &HookContext<'_>, _args: &HookArgs) -> Result<()> {
    if fabric::install_coordination_key(ctx)? {
        info!("LCM key added");
        return Ok(());
    }

    let delta = ctx.config;
    if delta.changed("plumgrid-license-key") {
        if fabric::post_license(ctx)? {
            info!("license posted");
        } else {
            warn!("license was not accepted");
        }
        return Ok(());
    }

    if delta.changed("fabric-interfaces") && !fabric::fabric_interface_changed(ctx)? {
        info!("fabric interface already set");
        return Ok(());
    }

    if delta.changed("os-data-network") && fabric::uses_management_network(ctx) {
        info!("fabric running on management network");
        return Ok(());
    }

    reconfigure(ctx)
}

fn reconfigure(ctx: &HookContext<'_>) -> Result<()> {
    ctx.services.stop(SERVICE)?;
    ctx.packages.update_sources()?;
    fabric::install_packages(ctx)?;
    fabric::unload_fabric_module(ctx)?;
    fabric::load_fabric_module(ctx)?;
    for rid in ctx.relations.relation_ids(FABRIC_RELATION)? {
        FabricPeer.on_joined(ctx, Some(&rid))?;
    }
    fabric::ensure_mtu(ctx)?;
    fabric::install_coordination_key(ctx)?;
    fabric::write_all_configs(ctx)?;
    ctx.services.restart(SERVICE)?;
    info!("reconfiguration complete");
    Ok(())
}
