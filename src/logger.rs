use std::io::Write;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Stderr logger behind the `log` facade.
///
/// Severity comes from `FOLIO_LOG` (or `RUST_LOG`); `NO_COLOR` disables
/// the colored level prefix.
pub struct Logger {
    pub severity: Level,
    pub enable_colors: bool,
}

impl Logger {
    /// Initialize the logger from environment variables
    pub fn init() -> Result<(), log::SetLoggerError> {
        let severity = std::env::var("FOLIO_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string())
            .parse::<Level>()
            .unwrap_or(Level::Info);
        let enable_colors = std::env::var("NO_COLOR").is_err();

        let logger = Logger {
            severity,
            enable_colors,
        };
        log::set_max_level(LevelFilter::Trace);
        log::set_logger(Box::leak(Box::new(logger)))?;
        Ok(())
    }

    /// Get current timestamp as HH:MM:SS
    fn get_timestamp() -> String {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();
        let secs = now.as_secs();
        format!(
            "{:02}:{:02}:{:02}",
            (secs / 3600) % 24,
            (secs / 60) % 60,
            secs % 60
        )
    }

    /// Get color code for log level
    fn get_color(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[36m",
            Level::Debug => "\x1b[35m",
            Level::Trace => "\x1b[37m",
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.severity
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Self::get_timestamp();
        let level_str = record.level().as_str();
        let args = record.args();

        let formatted = if self.enable_colors {
            let color = Self::get_color(record.level());
            format!("{color}[{timestamp}] {level_str}\x1b[0m {args}\n")
        } else {
            format!("[{timestamp}] {level_str} {args}\n")
        };

        let _ = std::io::stderr().write_all(formatted.as_bytes());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
