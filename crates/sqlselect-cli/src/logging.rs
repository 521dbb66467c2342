use tracing::Level;
use tracing_subscriber::fmt::{self, format::FmtSpan};

use crate::cli::Verbosity;

impl Verbosity {
    fn level(self) -> Level {
        match self {
            Verbosity::Quiet => Level::ERROR,
            Verbosity::Normal => Level::WARN,
            Verbosity::Debug => Level::DEBUG,
            Verbosity::Trace => Level::TRACE,
        }
    }
}

/// Install the stderr subscriber. Stdout is reserved for rendered queries.
pub fn setup_logging(verbosity: Verbosity) {
    let filter_level = verbosity.level();

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(format!(
            "sqlselect={filter_level},sqlselect_cli={filter_level}"
        ))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(std::io::stderr)
        .compact()
        .without_time()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install tracing subscriber: {e}");
    }
}
