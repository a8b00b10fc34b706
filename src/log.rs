//! The `log` module defines an interface to the crate's internal logging
//! facilities, as distinct from _reporting_, which records model output.
//!
//! This module (re)exports the five logging macros: `error!`, `warn!`,
//! `info!`, `debug!` and `trace!` where `error!` represents the
//! highest-priority log messages and `trace!` the lowest. To emit a log
//! message, simply use one of these macros in your code:
//!
//! ```rust
//! use vecdyn::info;
//!
//! pub fn do_a_thing() {
//!     info!("A thing is being done.");
//! }
//! ```
//!
//! Logging is _disabled_ by default. Log messages are enabled/disabled
//! using the functions:
//!
//!  - `enable_logging()`: turns on all log messages
//!  - `disable_logging()`: turns off all log messages
//!  - `set_log_level(level: LevelFilter)`: enables only log messages with
//!    priority at least `level`

use std::sync::Mutex;

use env_logger::{Builder, WriteStyle};
pub use log::{debug, error, info, trace, warn, LevelFilter};

// Logging disabled.
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Off;

/// Holds logging configuration so level changes can be applied after the
/// global logger has been installed. The logger itself is built once with
/// an open filter; the effective level is controlled through
/// `log::set_max_level`.
struct LogConfiguration {
    global_log_level: LevelFilter,
    installed: bool,
}

static LOG_CONFIGURATION: Mutex<LogConfiguration> = Mutex::new(LogConfiguration {
    global_log_level: DEFAULT_LOG_LEVEL,
    installed: false,
});

/// Enables the logger with no global level filter / full logging.
/// Equivalent to `set_log_level(LevelFilter::Trace)`.
pub fn enable_logging() {
    set_log_level(LevelFilter::Trace);
}

/// Disables logging completely. Equivalent to
/// `set_log_level(LevelFilter::Off)`.
pub fn disable_logging() {
    set_log_level(LevelFilter::Off);
}

/// Sets the global log level. A level of `LevelFilter::Off` disables
/// logging. Installs the global logger on first use.
pub fn set_log_level(level: LevelFilter) {
    let mut configuration = LOG_CONFIGURATION.lock().unwrap();
    configuration.global_log_level = level;

    if !configuration.installed {
        let logger = Builder::new()
            // The logger passes everything; `log::set_max_level` below is
            // the single point of control.
            .filter_level(LevelFilter::Trace)
            .write_style(WriteStyle::Auto)
            .build();
        // Another logger may already be registered by the host process;
        // level control still applies in that case.
        if log::set_boxed_logger(Box::new(logger)).is_ok() {
            configuration.installed = true;
        }
    }
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_changes_are_idempotent() {
        set_log_level(LevelFilter::Info);
        assert_eq!(log::max_level(), LevelFilter::Info);
        set_log_level(LevelFilter::Debug);
        assert_eq!(log::max_level(), LevelFilter::Debug);
        disable_logging();
        assert_eq!(log::max_level(), LevelFilter::Off);
    }
}
