use tracing::debug;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Initialize console logging for the pipeline.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug level.
/// All output goes to stderr so the summary on stdout stays clean for
/// shell pipelines.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sheetprep={}", default_level)));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact();

    Registry::default().with(env_filter).with(console_layer).init();

    debug!("Logging initialized at {} level", default_level);
}
