pub mod context;
pub mod error;
pub mod fabric;
pub mod handlers;
pub mod packages;
pub mod registry;
pub mod render;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types for convenience.
pub use context::{HookArgs, HookContext};
pub use error::{HookError, Result};
pub use handlers::{DirectorPeer, FabricPeer, PeerAnnouncement};
pub use packages::determine_packages;
pub use registry::{default_registry, Dispatch, HookHandler, HookRegistry, HookRegistryBuilder};
pub use render::{ConfigRenderer, ConfigWriter, FabricLayout, RenderContext};
