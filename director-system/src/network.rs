use tracing::info;

use crate::error::{Result, SystemError};
use crate::process::{CommandRunner, CommandSpec};

/// Inspects interfaces and enforces link settings.
pub trait NetworkConfigurator {
    /// Name of the interface that carries the default route.
    fn default_route_interface(&self) -> Result<String>;
    fn set_mtu(&self, interface: &str, mtu: u32) -> Result<()>;
}

/// `ip` (iproute2) backed network configurator.
pub struct IpRoute2<R> {
    runner: R,
}

impl<R: CommandRunner> IpRoute2<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

/// Extracts the `dev` of the first default route in `ip route` output.
fn parse_default_route(output: &str) -> Option<&str> {
    output
        .lines()
        .filter(|l| l.trim_start().starts_with("default"))
        .find_map(|l| {
            let mut tokens = l.split_whitespace();
            tokens.find(|t| *t == "dev")?;
            tokens.next()
        })
}

impl<R: CommandRunner> NetworkConfigurator for IpRoute2<R> {
    fn default_route_interface(&self) -> Result<String> {
        let cmd = CommandSpec::new("ip").args(["route", "show", "default"]);
        let out = self.runner.run(&cmd)?;
        parse_default_route(&out.stdout)
            .map(ToString::to_string)
            .ok_or_else(|| SystemError::UnexpectedOutput {
                command: cmd.to_string(),
                detail: "no default route".to_string(),
            })
    }

    fn set_mtu(&self, interface: &str, mtu: u32) -> Result<()> {
        info!(interface, mtu, "setting interface mtu");
        let cmd = CommandSpec::new("ip")
            .args(["link", "set", "dev", interface, "mtu"])
            .arg(mtu.to_string());
        self.runner.run(&cmd)?;
        Ok(())
    }
}
