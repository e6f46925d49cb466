pub mod error;
pub mod hookenv;
pub mod keys;
pub mod kmod;
pub mod license;
pub mod network;
pub mod packages;
pub mod process;
pub mod retry;
pub mod service;

// Re-export key types for convenience.
pub use error::{Result, SystemError};
pub use hookenv::{HookTools, RelationChannel};
pub use keys::{AuthorizedKeys, KeyInstaller};
pub use kmod::{KernelModules, Modprobe};
pub use license::{DirectorApi, LicenseClient, LicenseRequest};
pub use network::{IpRoute2, NetworkConfigurator};
pub use packages::{Apt, PackageManager};
pub use process::{CommandOutput, CommandRunner, CommandSpec, SystemRunner};
pub use retry::{FixedRetry, RetryOutcome, Sleeper, ThreadSleeper};
pub use service::{ServiceControl, Systemctl};
