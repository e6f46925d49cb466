use clap::Parser;
use director_cli::{run, AgentSettings};
use director_hooks::default_registry;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let settings = AgentSettings::parse();

    // Hook output is captured by the agent; keep stdout for `--list`.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log_level.as_str().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();

    if settings.list {
        for name in default_registry()?.hook_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let argv0 = std::env::args().next().unwrap_or_default();
    if let Err(e) = run(&settings, &argv0) {
        error!(error = %format!("{e:#}"), "hook failed");
        return Err(e);
    }
    Ok(())
}
