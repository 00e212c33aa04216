//! Common logging initializer
//!
//! Everything goes through `tracing`, filters are taken from `RUST_LOG`.  We can add a
//! hierarchical output on stderr and/or an hourly rolling file.
//!

use eyre::Result;
use tracing::trace;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_tree::HierarchicalLayer;

/// Keeps the file writer alive, buffered lines are flushed when it is dropped.
///
#[derive(Debug, Default)]
pub struct LogGuard(Option<WorkerGuard>);

/// Setup the global subscriber.
///
/// - `name` is used as the prefix of the log files
/// - `use_tree` enables the `tracing_tree` hierarchical output
/// - `use_file` is the directory to write rolling log files into
///
pub fn init_logging(
    name: &'static str,
    use_tree: bool,
    use_file: Option<String>,
) -> Result<LogGuard> {
    // Load filters from environment
    //
    let filter = EnvFilter::from_default_env();

    // Do we want hierarchical output?
    //
    let tree = if use_tree {
        Some(
            HierarchicalLayer::new(2)
                .with_ansi(true)
                .with_span_retrace(true)
                .with_span_modes(true)
                .with_targets(true)
                .with_verbose_entry(true)
                .with_verbose_exit(true)
                .with_bracketed_fields(true),
        )
    } else {
        None
    };

    // Log to file?
    //
    let (file, guard) = match use_file {
        Some(dir) => {
            // Basic append-only rolling file for all traces.
            //
            let file_appender = tracing_appender::rolling::hourly(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // Combine filters & exporters
    //
    tracing_subscriber::registry()
        .with(filter)
        .with(tree)
        .with(file)
        .try_init()?;
    trace!("Logging initialised.");

    Ok(LogGuard(guard))
}

/// Flush and close the file output, if any.
///
#[tracing::instrument(skip(guard))]
pub fn close_logging(guard: LogGuard) {
    trace!("Closing logging.");
    drop(guard);
}
