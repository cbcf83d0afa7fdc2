use std::fs::OpenOptions;
use std::sync::Mutex;

/// Install the append-only log sink.
///
/// An unopenable destination silently disables logging; the shim must keep
/// working without a log file. Installation failures (a subscriber already
/// set by the host process) are ignored for the same reason.
pub(crate) fn init_file_logging(path: &str) {
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(_) => return,
    };

    let _ = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
