//! Logging initialization for the CLI
//!
//! Logs go to stderr so that `--format json` output on stdout stays parseable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn build_env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level(verbosity);
        EnvFilter::new(format!(
            "ferrum={level},ferrum_r5={level},ferrum_validator={level}"
        ))
    })
}

pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let console_layer = fmt::layer()
        .with_target(verbosity > 0)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(build_env_filter(verbosity))
        .with(console_layer)
        .try_init()?;

    Ok(())
}
