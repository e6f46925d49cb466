use tracing::info;

use crate::context::{HookArgs, HookContext, SERVICE};
use crate::error::Result;
use crate::fabric;

/// Sentinel `opsvm-ip` meaning the OpsVM address is not assigned yet.
const UNASSIGNED_OPSVM: &str = "127.0.0.1";

/// How this unit reacts when a peer joins one of its relations.
pub trait PeerAnnouncement {
    fn on_joined(&self, ctx: &HookContext<'_>, relation_id: Option<&str>) -> Result<()>;
}

/// Another director joined: re-render and restart so the cluster membership
/// in `plumgrid.conf` is picked up.
pub struct DirectorPeer;

impl PeerAnnouncement for DirectorPeer {
    fn on_joined(&self, ctx: &HookContext<'_>, _relation_id: Option<&str>) -> Result<()> {
        fabric::write_all_configs(ctx)?;
        ctx.services.restart(SERVICE)?;
        Ok(())
    }
}

/// An edge or gateway joined: hand it the OpsVM address.
pub struct FabricPeer;

impl PeerAnnouncement for FabricPeer {
    fn on_joined(&self, ctx: &HookContext<'_>, relation_id: Option<&str>) -> Result<()> {
        let raw = ctx.settings().str_or("opsvm-ip", UNASSIGNED_OPSVM);
        if raw == UNASSIGNED_OPSVM {
            info!("opsvm-ip not assigned yet, nothing to publish");
            return Ok(());
        }
        let addr = fabric::parse_address(raw)?.to_string();
        ctx.relations
            .relation_set(relation_id, &[("opsvm_ip", addr.as_str())])?;
        Ok(())
    }
}

pub fn director_joined(ctx: &HookContext<'_>, args: &HookArgs) -> Result<()> {
    DirectorPeer.on_joined(ctx, args.relation_id.as_deref())
}

pub fn plumgrid_joined(ctx: &HookContext<'_>, args: &HookArgs) -> Result<()> {
    FabricPeer.on_joined(ctx, args.relation_id.as_deref())
}
