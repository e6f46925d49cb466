use tracing::info;

use crate::error::Result;
use crate::process::{CommandRunner, CommandSpec};

/// Stops and restarts system services.
pub trait ServiceControl {
    fn stop(&self, service: &str) -> Result<()>;
    fn restart(&self, service: &str) -> Result<()>;
}

/// `systemctl` backed service control.
pub struct Systemctl<R> {
    runner: R,
}

impl<R: CommandRunner> Systemctl<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    fn systemctl(&self, verb: &str, service: &str) -> Result<()> {
        info!(service, action = verb, "service control");
        self.runner
            .run(&CommandSpec::new("systemctl").args([verb, service]))?;
        Ok(())
    }
}

impl<R: CommandRunner> ServiceControl for Systemctl<R> {
    fn stop(&self, service: &str) -> Result<()> {
        self.systemctl("stop", service)
    }

    fn restart(&self, service: &str) -> Result<()> {
        self.systemctl("restart", service)
    }
}
