//! User-facing notices.
//!
//! Components never print directly. They receive a [`Reporter`] and hand it
//! leveled messages; the binary installs a [`ConsoleReporter`], tests install
//! their own.

use console::style;
use std::fmt;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Progress information.
    Info,
    /// Something noteworthy happened to the cache, e.g. a file was removed.
    Notice,
    /// Recoverable problem.
    Warn,
    /// Failure.
    Error,
    /// Successful completion.
    Ok,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Level::Info => "Info",
            Level::Notice => "Notice",
            Level::Warn => "Warning",
            Level::Error => "Error",
            Level::Ok => "Ok",
        };
        f.write_str(label)
    }
}

/// Receives leveled user notices.
pub trait Reporter: Send + Sync {
    fn report(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.report(Level::Info, message);
    }

    fn notice(&self, message: &str) {
        self.report(Level::Notice, message);
    }

    fn warn(&self, message: &str) {
        self.report(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.report(Level::Error, message);
    }

    fn ok(&self, message: &str) {
        self.report(Level::Ok, message);
    }
}

/// Prints colored notices to stdout and mirrors them as tracing events.
#[derive(Debug, Clone, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Render a notice the way it appears on the console.
    pub fn render(level: Level, message: &str) -> String {
        let label = format!("{}:", level);
        match level {
            Level::Info => format!("{} {}", style(label).blue(), message),
            Level::Notice => format!("{} {}", style(label).green(), message),
            Level::Warn => format!("{} {}", style(label).yellow(), message),
            Level::Error => format!("{} {}", style(label).red(), message),
            Level::Ok => style(message).green().to_string(),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, level: Level, message: &str) {
        match level {
            Level::Info | Level::Notice | Level::Ok => tracing::info!("{}", message),
            Level::Warn => tracing::warn!("{}", message),
            Level::Error => tracing::error!("{}", message),
        }
        println!("{}", Self::render(level, message));
    }
}
