use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use std::io::Write;

/// Writes log records to stderr, one timestamped line each
pub struct CliLogger {
    level: LevelFilter,
}

impl CliLogger {
    /// Level from `-v`/`-q` counts: warnings by default
    pub fn new(verbose: u8, quiet: bool) -> Self {
        let level = if quiet {
            LevelFilter::Error
        } else {
            match verbose {
                0 => LevelFilter::Warn,
                1 => LevelFilter::Info,
                2 => LevelFilter::Debug,
                _ => LevelFilter::Trace,
            }
        };
        Self { level }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let target = if record.level() >= Level::Debug {
                format!(" {}", record.target())
            } else {
                String::new()
            };
            let _ = writeln!(
                std::io::stderr().lock(),
                "{} {:<5}{} {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                target,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
