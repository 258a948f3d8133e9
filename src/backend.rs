use std::str::FromStr;

use crate::logger::{Entry, Logger};

#[cfg(feature = "console")]
use crate::console::Console;
#[cfg(feature = "stackdriver")]
use crate::stackdriver::Stackdriver;
#[cfg(feature = "syslog")]
use crate::syslog::{Syslog, SyslogError};

/// Supported backend kinds that can be selected via config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Console,
    Syslog,
    Stackdriver,
}

impl FromStr for BackendKind {
    type Err = ParseBackendError;

    /// Accepts `console`, `syslog`, `stackdriver` (or `cloud`), in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "console" => Ok(BackendKind::Console),
            "syslog" => Ok(BackendKind::Syslog),
            "stackdriver" | "cloud" => Ok(BackendKind::Stackdriver),
            _ => Err(ParseBackendError::UnknownBackend(s.to_string())),
        }
    }
}

/// Which backend to build, and the service identity to build it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Selected backend implementation.
    pub kind: BackendKind,
    /// Service name passed to the backend constructor.
    pub daemon: String,
    /// Service version passed to the backend constructor.
    pub version: String,
}

impl BackendConfig {
    pub fn new(kind: BackendKind, daemon: impl Into<String>, version: impl Into<String>) -> Self {
        BackendConfig {
            kind,
            daemon: daemon.into(),
            version: version.into(),
        }
    }
}

/// Error type returned when parsing a backend name.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseBackendError {
    #[error("unknown or unsupported backend: {0:?}")]
    UnknownBackend(String),
}

/// Error type returned when building a backend from configuration.
#[derive(thiserror::Error, Debug)]
pub enum BackendBuildError {
    #[error("backend {0:?} is not enabled in this build")]
    FeatureDisabled(BackendKind),

    #[cfg(feature = "syslog")]
    #[error(transparent)]
    Syslog(#[from] SyslogError),
}

/// One concrete backend, chosen once at startup.
pub enum Backend {
    #[cfg(feature = "console")]
    Console(Console),
    #[cfg(feature = "syslog")]
    Syslog(Syslog),
    #[cfg(feature = "stackdriver")]
    Stackdriver(Stackdriver),
}

impl Backend {
    /// Build the backend described by `cfg`.
    ///
    /// This is the main entry point for applications that select their
    /// backend through configuration instead of naming a concrete type.
    ///
    /// **Returns**
    /// - `Err(BackendBuildError::FeatureDisabled)` if the selected backend
    ///   was compiled out.
    /// - `Err(BackendBuildError::Syslog)` if the syslog daemon is
    ///   unreachable.
    pub fn from_config(cfg: &BackendConfig) -> Result<Self, BackendBuildError> {
        match cfg.kind {
            BackendKind::Console => {
                #[cfg(feature = "console")]
                {
                    Console::new(&cfg.daemon, &cfg.version)
                        .map(Backend::Console)
                        .map_err(|never| match never {})
                }

                #[cfg(not(feature = "console"))]
                {
                    Err(BackendBuildError::FeatureDisabled(BackendKind::Console))
                }
            }
            BackendKind::Syslog => {
                #[cfg(feature = "syslog")]
                {
                    Ok(Backend::Syslog(Syslog::new(&cfg.daemon, &cfg.version)?))
                }

                #[cfg(not(feature = "syslog"))]
                {
                    Err(BackendBuildError::FeatureDisabled(BackendKind::Syslog))
                }
            }
            BackendKind::Stackdriver => {
                #[cfg(feature = "stackdriver")]
                {
                    Stackdriver::new(&cfg.daemon, &cfg.version)
                        .map(Backend::Stackdriver)
                        .map_err(|never| match never {})
                }

                #[cfg(not(feature = "stackdriver"))]
                {
                    Err(BackendBuildError::FeatureDisabled(BackendKind::Stackdriver))
                }
            }
        }
    }

    pub fn kind(&self) -> BackendKind {
        match *self {
            #[cfg(feature = "console")]
            Backend::Console(_) => BackendKind::Console,
            #[cfg(feature = "syslog")]
            Backend::Syslog(_) => BackendKind::Syslog,
            #[cfg(feature = "stackdriver")]
            Backend::Stackdriver(_) => BackendKind::Stackdriver,
        }
    }
}

impl Logger for Backend {
    fn log(&self, entry: &Entry<'_>) {
        // Dereferenced so the match stays exhaustive when every backend
        // feature is off and `Backend` has no variants.
        match *self {
            #[cfg(feature = "console")]
            Backend::Console(ref inner) => inner.log(entry),
            #[cfg(feature = "syslog")]
            Backend::Syslog(ref inner) => inner.log(entry),
            #[cfg(feature = "stackdriver")]
            Backend::Stackdriver(ref inner) => inner.log(entry),
        }
    }
}
