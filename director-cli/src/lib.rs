pub mod cli_args;
pub mod runner;

pub use cli_args::{AgentSettings, ArgsError, BIN_NAME};
pub use runner::{run, run_hook};
