use tracing::{debug, info};

use crate::error::Result;
use crate::process::{CommandRunner, CommandSpec};

/// Installs and removes OS packages.
pub trait PackageManager {
    /// Refresh package source metadata.
    fn update_sources(&self) -> Result<()>;
    /// Install one package non-interactively. `options` go before the verb.
    fn install(&self, package: &str, options: &[&str]) -> Result<()>;
    fn purge(&self, package: &str) -> Result<()>;
}

/// `apt-get` backed package manager.
pub struct Apt<R> {
    runner: R,
}

impl<R: CommandRunner> Apt<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    fn apt_get(&self) -> CommandSpec {
        CommandSpec::new("apt-get").env("DEBIAN_FRONTEND", "noninteractive")
    }
}

impl<R: CommandRunner> PackageManager for Apt<R> {
    fn update_sources(&self) -> Result<()> {
        debug!("refreshing package sources");
        self.runner.run(&self.apt_get().arg("update"))?;
        Ok(())
    }

    fn install(&self, package: &str, options: &[&str]) -> Result<()> {
        info!(package, "installing package");
        let cmd = self
            .apt_get()
            .arg("--assume-yes")
            .args(options.iter().copied())
            .arg("install")
            .arg(package);
        self.runner.run(&cmd)?;
        Ok(())
    }

    fn purge(&self, package: &str) -> Result<()> {
        info!(package, "purging package");
        let cmd = self.apt_get().args(["--assume-yes", "purge", package]);
        self.runner.run(&cmd)?;
        Ok(())
    }
}
