//! One handler per lifecycle event.

mod config_changed;
mod install;
mod relation;
mod start;
mod stop;
mod upgrade;

pub use config_changed::config_changed;
pub use install::install;
pub use relation::{director_joined, plumgrid_joined, DirectorPeer, FabricPeer, PeerAnnouncement};
pub use start::start;
pub use stop::stop;
pub use upgrade::upgrade_charm;
