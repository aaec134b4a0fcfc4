use snafu::{ResultExt, Snafu};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Could not init log file: {}", source))]
    InitLog { source: std::io::Error },

    #[snafu(display("Could not redirect log records to tracing: {}", source))]
    LogTracer { source: tracing_log::log::SetLoggerError },

    #[snafu(display("Could not set the global subscriber: {}", source))]
    GlobalSubscriber {
        source: tracing::subscriber::SetGlobalDefaultError,
    },
}

/// Installs the global bunyan subscriber.
///
/// A directory gets a daily rolling `hotel.log`, a file is appended to, and
/// without any path the logs go to stdout. The returned guard flushes pending
/// records when dropped, so it must be held until the program exits.
pub fn logger_init<P: AsRef<Path>>(path: Option<P>) -> Result<WorkerGuard, Error> {
    LogTracer::init().context(LogTracerSnafu)?;

    // RUST_LOG=hotel=debug,warp=info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let app_name = concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION")).to_string();

    let (non_blocking, guard) = match path.as_ref().map(AsRef::as_ref) {
        Some(path) if path.is_dir() => {
            let file_appender = tracing_appender::rolling::daily(path, "hotel.log");
            tracing_appender::non_blocking(file_appender)
        }
        Some(path) => tracing_appender::non_blocking(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .context(InitLogSnafu)?,
        ),
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    let bunyan_formatting_layer = BunyanFormattingLayer::new(app_name, non_blocking);
    let subscriber = Registry::default()
        .with(filter)
        .with(JsonStorageLayer)
        .with(bunyan_formatting_layer);
    tracing::subscriber::set_global_default(subscriber).context(GlobalSubscriberSnafu)?;

    Ok(guard)
}
