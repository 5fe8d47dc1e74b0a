use tracing_subscriber::EnvFilter;

use crate::cli::AppContext;

/// Environment variable consulted before `RUST_LOG`
pub const LOG_ENV: &str = "PRODCOST_LOG";

/// Install the stderr subscriber; later calls are no-ops
pub fn init(ctx: &AppContext)
{
    let fallback = if ctx.quiet { "error" } else { "warn" };

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!ctx.no_color)
        .with_target(false)
        .try_init();
}
