//! Provisioning steps shared by several hooks.

use std::net::IpAddr;

use director_system::LicenseRequest;
use tracing::warn;

use crate::context::{HookContext, DIRECTOR_RELATION, FABRIC_MODULE, PACKET_FILTER_MODULES};
use crate::error::{HookError, Result};
use crate::packages::determine_packages;
use crate::render::RenderContext;

/// `fabric-interfaces` value that puts the fabric on the management network.
pub const MANAGEMENT: &str = "MANAGEMENT";

const DEFAULT_MTU: u32 = 1580;
const DEFAULT_API_USER: &str = "plumgrid";
const DEFAULT_API_PASSWORD: &str = "plumgrid";

pub fn load_packet_filter(ctx: &HookContext<'_>) -> Result<()> {
    for module in PACKET_FILTER_MODULES {
        ctx.modules.load(module)?;
    }
    Ok(())
}

/// Installs the package set in order; the first failure aborts.
pub fn install_packages(ctx: &HookContext<'_>) -> Result<()> {
    for package in determine_packages(ctx.settings()) {
        ctx.packages
            .install(&package, &["--force-yes"])
            .map_err(|source| HookError::PackageInstall { package, source })?;
    }
    Ok(())
}

/// Purges the package set, logging and skipping failures.
pub fn purge_packages(ctx: &HookContext<'_>) {
    for package in determine_packages(ctx.settings()) {
        if let Err(e) = ctx.packages.purge(&package) {
            warn!(package = %package, error = %e, "purge failed, continuing");
        }
    }
}

pub fn load_fabric_module(ctx: &HookContext<'_>) -> Result<()> {
    ctx.modules.load(FABRIC_MODULE)?;
    Ok(())
}

pub fn unload_fabric_module(ctx: &HookContext<'_>) -> Result<()> {
    ctx.modules.unload(FABRIC_MODULE)?;
    Ok(())
}

pub fn uses_management_network(ctx: &HookContext<'_>) -> bool {
    ctx.settings().str_or("fabric-interfaces", MANAGEMENT) == MANAGEMENT
}

/// The concrete interface the fabric runs on.
pub fn resolve_fabric_interface(ctx: &HookContext<'_>) -> Result<String> {
    match ctx.settings().get_str("fabric-interfaces") {
        Some(iface) if iface != MANAGEMENT => Ok(iface.to_string()),
        _ => Ok(ctx.network.default_route_interface()?),
    }
}

/// Whether the resolved fabric interface differs from the rendered one.
pub fn fabric_interface_changed(ctx: &HookContext<'_>) -> Result<bool> {
    let wanted = resolve_fabric_interface(ctx)?;
    let recorded = ctx.renderer.recorded_fabric_interface()?;
    Ok(recorded.as_deref() != Some(wanted.as_str()))
}

fn configured_mtu(ctx: &HookContext<'_>) -> Result<u32> {
    let settings = ctx.settings();
    match settings.get("network-device-mtu") {
        None => Ok(DEFAULT_MTU),
        Some(raw) => settings
            .get_int("network-device-mtu")
            .and_then(|v| u32::try_from(v).ok())
            .filter(|v| *v > 0)
            .ok_or_else(|| HookError::InvalidSetting {
                key: "network-device-mtu".to_string(),
                value: raw.to_string(),
            }),
    }
}

pub fn ensure_mtu(ctx: &HookContext<'_>) -> Result<()> {
    let mtu = configured_mtu(ctx)?;
    let iface = resolve_fabric_interface(ctx)?;
    ctx.network.set_mtu(&iface, mtu)?;
    Ok(())
}

/// Installs the coordination key when configured. Returns `true` only when
/// the key was not present before this call.
pub fn install_coordination_key(ctx: &HookContext<'_>) -> Result<bool> {
    match ctx.settings().get_str("lcm-ssh-key") {
        Some(key) => Ok(ctx.keys.install_key(key)?),
        None => Ok(false),
    }
}

pub fn license_key<'a>(ctx: &'a HookContext<'_>) -> Option<&'a str> {
    ctx.settings().get_str("plumgrid-license-key")
}

/// One license post. `Ok(false)` covers everything the director may still
/// fix by itself, including a missing virtual IP.
pub fn post_license(ctx: &HookContext<'_>) -> Result<bool> {
    let settings = ctx.settings();
    let Some(key) = license_key(ctx) else {
        return Ok(false);
    };
    let Some(virtual_ip) = settings.get_str("plumgrid-virtual-ip") else {
        warn!("plumgrid-virtual-ip is not set, cannot post license");
        return Ok(false);
    };
    let request = LicenseRequest {
        virtual_ip: virtual_ip.to_string(),
        key: key.to_string(),
        username: settings
            .str_or("plumgrid-username", DEFAULT_API_USER)
            .to_string(),
        password: settings
            .str_or("plumgrid-password", DEFAULT_API_PASSWORD)
            .to_string(),
    };
    Ok(ctx.license.post_license(&request)?)
}

/// Parses a peer-facing address.
pub fn parse_address(raw: &str) -> Result<IpAddr> {
    raw.trim()
        .parse()
        .map_err(|_| HookError::InvalidAddress(raw.to_string()))
}

fn director_addresses(ctx: &HookContext<'_>, local: &str) -> Result<Vec<String>> {
    let mut addrs = vec![local.to_string()];
    for rid in ctx.relations.relation_ids(DIRECTOR_RELATION)? {
        for unit in ctx.relations.related_units(&rid)? {
            if let Some(addr) = ctx.relations.relation_get(&rid, &unit, "private-address")? {
                addrs.push(addr);
            }
        }
    }
    addrs.sort();
    addrs.dedup();
    Ok(addrs)
}

/// Renders and writes every managed configuration file.
pub fn write_all_configs(ctx: &HookContext<'_>) -> Result<()> {
    let local_address = ctx.relations.local_address()?;
    let management_interface = ctx.network.default_route_interface()?;
    let fabric_interface = if uses_management_network(ctx) {
        management_interface.clone()
    } else {
        resolve_fabric_interface(ctx)?
    };
    let render_ctx = RenderContext {
        director_addresses: director_addresses(ctx, &local_address)?,
        local_address,
        management_interface,
        fabric_interface,
        virtual_ip: ctx
            .settings()
            .get_str("plumgrid-virtual-ip")
            .map(ToString::to_string),
    };
    ctx.renderer.write_all(&render_ctx)?;
    Ok(())
}
