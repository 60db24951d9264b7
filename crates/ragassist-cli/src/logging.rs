use std::sync::OnceLock;

use ragassist_core::config::{LoggingConfig, PathsConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the console and log-file layers
///
/// `RUST_LOG` overrides the configured console level. The console writes to stderr so
/// `--json` output on stdout stays parseable.
pub fn init(logging: &LoggingConfig, paths: &PathsConfig) {
    let log_dir = &paths.outputs_dir;
    let _ = std::fs::create_dir_all(log_dir);

    let file_appender = tracing_appender::rolling::never(log_dir, &logging.file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.console_level));
    let file_filter = EnvFilter::new(format!(
        "{},hyper=info,hyper_util=info,reqwest=info",
        logging.file_level
    ));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_filter(file_filter);

    let _ = tracing_subscriber::registry().with(console_layer).with(file_layer).try_init();
}
