//! A four-method logging facade (`infof`, `debugf`, `errorf`,
//! `criticalf`) with interchangeable backends: plain console text, the
//! local syslog daemon, or cloud error-reporting JSON on stdout.
//!
//! ```no_run
//! use logr::backend::{Backend, BackendConfig};
//! use logr::{errorf, infof};
//!
//! let cfg = BackendConfig::from_env().expect("valid LOGR_BACKEND");
//! let logger = Backend::from_config(&cfg).expect("logger backend");
//!
//! infof!(logger, "processed {} items", 42);
//! errorf!(logger, "failed to connect: {}", "timeout");
//! ```

pub mod logger;
pub mod sink;
pub mod noop_sink;
pub mod backend;
pub mod env;
pub mod layer;
pub mod init;

#[cfg(feature = "console")]
pub mod console;

#[cfg(feature = "syslog")]
pub mod syslog;

#[cfg(feature = "stackdriver")]
pub mod record;
#[cfg(feature = "stackdriver")]
pub mod caller;
#[cfg(feature = "stackdriver")]
pub mod stackdriver;

pub use logger::{CallSite, Entry, Logger, Severity};

/// Log an INFO message: `infof!(logger, "processed {} items", n)`.
#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {
        $crate::Logger::infof(&$logger, ::core::format_args!($($arg)+))
    };
}

/// Log a DEBUG message: `debugf!(logger, "value={}", v)`.
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::Logger::debugf(&$logger, ::core::format_args!($($arg)+))
    };
}

/// Log an ERROR message; reporting backends attach the caller location
/// and a stack trace.
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::Logger::errorf(&$logger, ::core::format_args!($($arg)+))
    };
}

/// Log a CRITICAL message; reporting backends attach the caller location
/// and a stack trace.
#[macro_export]
macro_rules! criticalf {
    ($logger:expr, $($arg:tt)+) => {
        $crate::Logger::criticalf(&$logger, ::core::format_args!($($arg)+))
    };
}
