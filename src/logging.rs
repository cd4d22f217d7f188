use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::{Args, ValueEnum};
use log::{Level, LevelFilter, Log, Metadata, Record};

type SyslogLogger = syslog::Logger<syslog::LoggerBackend, syslog::Formatter3164>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Log level (default: warn)
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevel>,

    /// Append log messages to a file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Send log messages to syslog
    #[arg(long)]
    pub syslog: bool,
}

struct GenLogger {
    level: LevelFilter,
    log_file: Option<Mutex<File>>,
    syslog: Option<Mutex<SyslogLogger>>,
}

fn format_line(level: Level, args: &fmt::Arguments<'_>) -> String {
    let tag = match level {
        Level::Error => "error",
        Level::Warn => "warning",
        Level::Info => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
    };
    format!("[fortuna-gen] {}: {}", tag, args)
}

impl Log for GenLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_line(record.level(), record.args());
        let _ = writeln!(std::io::stderr().lock(), "{}", line);

        if let Some(file) = &self.log_file {
            if let Ok(mut f) = file.lock() {
                let _ = writeln!(f, "{}", line);
            }
        }

        if let Some(logger) = &self.syslog {
            if let Ok(mut l) = logger.lock() {
                let text = record.args().to_string();
                let _ = match record.level() {
                    Level::Error => l.err(&text),
                    Level::Warn => l.warning(&text),
                    Level::Info => l.info(&text),
                    Level::Debug | Level::Trace => l.debug(&text),
                };
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.log_file {
            if let Ok(mut f) = file.lock() {
                let _ = f.flush();
            }
        }
    }
}

/// Install the process logger. Sinks that cannot be opened are reported
/// through the logger once it is running, and skipped.
pub fn init(args: &LogArgs) {
    let level: LevelFilter = args.log_level.unwrap_or(LogLevel::Warn).into();
    let mut problems = Vec::new();

    let log_file = match &args.log_file {
        Some(path) => match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => Some(Mutex::new(f)),
            Err(e) => {
                problems.push(format!("cannot open log file {}: {}", path.display(), e));
                None
            }
        },
        None => None,
    };

    let syslog = if args.syslog {
        let formatter = syslog::Formatter3164 {
            facility: syslog::Facility::LOG_USER,
            hostname: None,
            process: "fortuna-gen".into(),
            pid: std::process::id(),
        };
        match syslog::unix(formatter) {
            Ok(l) => Some(Mutex::new(l)),
            Err(e) => {
                problems.push(format!("cannot connect to syslog: {}", e));
                None
            }
        }
    } else {
        None
    };

    let logger = GenLogger {
        level,
        log_file,
        syslog,
    };
    let _ = log::set_boxed_logger(Box::new(logger));
    log::set_max_level(level);

    for problem in problems {
        log::warn!("{}", problem);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::Error);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
    }

    #[test]
    fn test_format_line() {
        let line = format_line(Level::Warn, &format_args!("counter {}", 7));
        assert_eq!(line, "[fortuna-gen] warning: counter 7");
    }

    #[test]
    fn test_enabled_respects_level() {
        let logger = GenLogger {
            level: LevelFilter::Info,
            log_file: None,
            syslog: None,
        };
        let debug = Metadata::builder().level(Level::Debug).build();
        let error = Metadata::builder().level(Level::Error).build();
        assert!(!logger.enabled(&debug));
        assert!(logger.enabled(&error));
    }
}
