use tracing::info;

use crate::error::Result;
use crate::process::{CommandRunner, CommandSpec};

/// Loads and unloads kernel modules.
pub trait KernelModules {
    fn load(&self, module: &str) -> Result<()>;
    fn unload(&self, module: &str) -> Result<()>;
}

/// `modprobe` backed module loader.
pub struct Modprobe<R> {
    runner: R,
}

impl<R: CommandRunner> Modprobe<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> KernelModules for Modprobe<R> {
    fn load(&self, module: &str) -> Result<()> {
        info!(module, "loading kernel module");
        self.runner.run(&CommandSpec::new("modprobe").arg(module))?;
        Ok(())
    }

    fn unload(&self, module: &str) -> Result<()> {
        info!(module, "unloading kernel module");
        self.runner.run(&CommandSpec::new("modprobe").args(["-r", module]))?;
        Ok(())
    }
}
