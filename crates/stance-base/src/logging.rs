use log::{LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static START: OnceLock<Instant> = OnceLock::new();

/// Time since the first log record (or the first call to this function).
fn uptime() -> Duration {
    START.get_or_init(Instant::now).elapsed()
}

/// Formats one log line: `   12.345s INFO  [target] message`.
pub fn format_line(elapsed: Duration, record: &Record) -> String {
    format!(
        "{:>9.3}s {:<5} [{}] {}",
        elapsed.as_secs_f64(),
        record.level(),
        record.target(),
        record.args()
    )
}

/// A logger that writes to stdout, prefixed with the time since startup.
pub struct ConsoleLogger {
    max_level: LevelFilter,
}

impl ConsoleLogger {
    pub const fn new(max_level: LevelFilter) -> Self {
        Self { max_level }
    }

    pub fn max_level(&self) -> LevelFilter {
        self.max_level
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(uptime(), record);
        let mut stdout = std::io::stdout().lock();
        // stdout closed (e.g. piped into `head`): nothing useful left to do
        let _ = writeln!(stdout, "{line}");
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

/// Max level for the current build: `Debug` in debug builds, `Info` in release builds.
pub fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initialize the global logger with a `ConsoleLogger` at the build's default level.
///
/// This can only be called once per process. Subsequent calls are silently ignored.
pub fn init_console_logger() {
    static LOGGER: OnceLock<ConsoleLogger> = OnceLock::new();

    let logger = LOGGER.get_or_init(|| ConsoleLogger::new(default_level()));
    uptime();
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.max_level());
    }
}
