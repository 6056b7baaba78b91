//! Logging Infrastructure
//!
//! `tracing-subscriber` setup: human readable or JSON lines, to stdout or to a
//! daily rolling file.

use std::path::Path;
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Default directives when neither `RUST_LOG` nor a level is given
const DEFAULT_FILTER: &str = "pricing_server=info,tower_http=info";

/// Initialize the logger with defaults (stdout, text, `info`)
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Initialize the logger
///
/// `RUST_LOG` wins over `log_level`; `log_level` applies to this crate and the
/// HTTP trace layer. When `log_dir` can't be created, output goes to stdout.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match log_level {
        Some(level) => EnvFilter::new(format!("pricing_server={level},tower_http={level}")),
        None => EnvFilter::new(DEFAULT_FILTER),
    });

    let appender = log_dir.and_then(|dir| {
        let path = Path::new(dir);
        match std::fs::create_dir_all(path) {
            Ok(()) => Some(tracing_appender::rolling::daily(path, "pricing-server")),
            Err(e) => {
                eprintln!("Cannot create log dir {}: {}, logging to stdout", dir, e);
                None
            }
        }
    });

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match (json, appender) {
        (true, Some(file)) => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(file)
            .boxed(),
        (true, None) => tracing_subscriber::fmt::layer().json().boxed(),
        (false, Some(file)) => tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(file)
            .boxed(),
        (false, None) => tracing_subscriber::fmt::layer().with_target(false).boxed(),
    };

    // Ignore a second initialisation (integration tests share one process)
    let _ = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init();
}
