//! Managed configuration files and their on-disk layout.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{HookError, Result};

/// Container rootfs the fabric runs in, relative to the filesystem root.
const LXC_ROOT: &str = "var/lib/libvirt/filesystems/plumgrid";
/// Persistent data volume of the container.
const LXC_DATA: &str = "var/lib/libvirt/filesystems/plumgrid-data";

const PLUMGRID_PORT: u16 = 8001;
const RSYNC_PORT: u16 = 2222;
const REST_ADDR: &str = "0.0.0.0:9180";
const VIRTUAL_ROUTER_ID: u8 = 251;

/// Where managed files live under a filesystem root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FabricLayout {
    root: PathBuf,
}

impl FabricLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn conf_dir(&self) -> PathBuf {
        self.root.join(LXC_ROOT).join("etc/plumgrid")
    }

    pub fn plumgrid_conf(&self) -> PathBuf {
        self.conf_dir().join("plumgrid.conf")
    }

    pub fn ifcs_conf(&self) -> PathBuf {
        self.conf_dir().join("ifcs.conf")
    }

    pub fn keepalived_conf(&self) -> PathBuf {
        self.root.join(LXC_ROOT).join("etc/keepalived/keepalived.conf")
    }

    /// The lifecycle manager's login key goes here.
    pub fn lcm_authorized_keys(&self) -> PathBuf {
        self.root.join(LXC_DATA).join("root/.ssh/authorized_keys")
    }
}

/// Values the templates are filled from, gathered once per write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub local_address: String,
    pub management_interface: String,
    pub fabric_interface: String,
    /// Every director address including this unit, sorted.
    pub director_addresses: Vec<String>,
    pub virtual_ip: Option<String>,
}

fn render_plumgrid_conf(ctx: &RenderContext) -> String {
    format!(
        "plumgrid_ip={directors}
plumgrid_port={PLUMGRID_PORT}
mgmt_dev={mgmt}
label=director-{local}
plumgrid_rsync_port={RSYNC_PORT}
plumgrid_rest_addr={REST_ADDR}
fabric_mode=host
start_plumgrid_iovisor=yes
start_plumgrid=`/opt/pg/scripts/pg_is_director.sh $plumgrid_ip`
",
        directors = ctx.director_addresses.join(","),
        mgmt = ctx.management_interface,
        local = ctx.local_address,
    )
}

fn render_ifcs_conf(ctx: &RenderContext) -> String {
    format!("{} = fabric_core host\n", ctx.fabric_interface)
}

fn render_keepalived_conf(ctx: &RenderContext, virtual_ip: &str) -> String {
    format!(
        "global_defs {{
  router_id PLUMgrid_Director
}}

vrrp_instance VI_PG {{
  state BACKUP
  interface {iface}
  virtual_router_id {VIRTUAL_ROUTER_ID}
  priority 100
  advert_int 1
  nopreempt
  virtual_ipaddress {{
    {virtual_ip}
  }}
}}
",
        iface = ctx.management_interface,
    )
}

/// Writes the managed configuration set.
pub trait ConfigWriter {
    /// Writes every managed file; returns the paths written.
    fn write_all(&self, ctx: &RenderContext) -> Result<Vec<PathBuf>>;
    /// The fabric interface recorded in the currently rendered `ifcs.conf`.
    fn recorded_fabric_interface(&self) -> Result<Option<String>>;
}

/// Renders the managed files and writes them as one set.
#[derive(Debug, Clone)]
pub struct ConfigRenderer {
    layout: FabricLayout,
}

impl ConfigRenderer {
    pub fn new(layout: FabricLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &FabricLayout {
        &self.layout
    }

    /// Path/content pairs for every managed file. keepalived is only
    /// managed when a virtual IP is configured.
    pub fn render(&self, ctx: &RenderContext) -> Vec<(PathBuf, String)> {
        let mut files = vec![
            (self.layout.plumgrid_conf(), render_plumgrid_conf(ctx)),
            (self.layout.ifcs_conf(), render_ifcs_conf(ctx)),
        ];
        if let Some(vip) = &ctx.virtual_ip {
            files.push((self.layout.keepalived_conf(), render_keepalived_conf(ctx, vip)));
        }
        files
    }
}

impl ConfigWriter for ConfigRenderer {
    /// Stages every file next to its target before renaming any of them into
    /// place, so a failure while staging leaves existing files untouched.
    fn write_all(&self, ctx: &RenderContext) -> Result<Vec<PathBuf>> {
        let mut staged = Vec::new();
        for (path, content) in self.render(ctx) {
            let tmp = stage(&path, &content).map_err(|source| HookError::Render {
                path: path.display().to_string(),
                source,
            })?;
            staged.push((path, tmp));
        }

        let mut written = Vec::with_capacity(staged.len());
        for (path, tmp) in staged {
            tmp.persist(&path).map_err(|e| HookError::Render {
                path: path.display().to_string(),
                source: e.error,
            })?;
            debug!(path = %path.display(), "wrote config");
            written.push(path);
        }
        info!(files = written.len(), "wrote managed configuration");
        Ok(written)
    }

    fn recorded_fabric_interface(&self) -> Result<Option<String>> {
        let path = self.layout.ifcs_conf();
        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(HookError::Render {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        Ok(data.lines().find_map(|line| {
            let (iface, role) = line.split_once('=')?;
            role.contains("fabric_core")
                .then(|| iface.trim().to_string())
                .filter(|i| !i.is_empty())
        }))
    }
}

fn stage(path: &Path, content: &str) -> std::io::Result<tempfile::NamedTempFile> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    Ok(tmp)
}
