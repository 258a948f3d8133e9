use crate::logger::{Entry, Logger, Severity};
use std::error::Error;
use std::sync::{Mutex, PoisonError};

use ::syslog::{Facility, Formatter3164, LoggerBackend};

/// Severity-specific writes of a syslog connection.
///
/// Implemented for the unix-socket logger of the `syslog` crate; callers
/// that acquire their connection some other way (remote UDP/TCP daemon,
/// tests) implement it on their own handle and pass it to
/// [`Syslog::with_transport`].
pub trait SyslogTransport: Send {
    fn info(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
    fn debug(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
    fn err(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
    fn crit(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
}

impl SyslogTransport for ::syslog::Logger<LoggerBackend, Formatter3164> {
    fn info(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        ::syslog::Logger::info(self, message).map_err(|e| e.to_string().into())
    }

    fn debug(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        ::syslog::Logger::debug(self, message).map_err(|e| e.to_string().into())
    }

    fn err(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        ::syslog::Logger::err(self, message).map_err(|e| e.to_string().into())
    }

    fn crit(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        ::syslog::Logger::crit(self, message).map_err(|e| e.to_string().into())
    }
}

/// Error returned when the syslog backend cannot acquire its connection.
#[derive(thiserror::Error, Debug)]
pub enum SyslogError {
    #[error("cannot connect to local syslog daemon: {0}")]
    Unavailable(#[source] ::syslog::Error),
}

/// Backend forwarding each call to the matching severity of a syslog
/// connection owned by this handle.
///
/// The connection stays open for the lifetime of the handle and is
/// closed when the handle is dropped.
pub struct Syslog {
    transport: Mutex<Box<dyn SyslogTransport>>,
}

impl Syslog {
    /// Connect to the local syslog daemon over its unix socket.
    ///
    /// `daemon` and `version` are accepted for constructor parity with the
    /// other backends; messages are tagged with the executable name, as
    /// the system syslog API does by default.
    ///
    /// **Returns**
    /// - `Err(SyslogError::Unavailable)` if no daemon socket could be
    ///   opened.
    pub fn new(daemon: &str, version: &str) -> Result<Self, SyslogError> {
        let _ = (daemon, version);
        let formatter = Formatter3164 {
            facility: Facility::LOG_USER,
            hostname: None,
            process: process_name(),
            pid: std::process::id(),
        };

        let logger = ::syslog::unix(formatter).map_err(SyslogError::Unavailable)?;
        Ok(Self::with_transport(logger))
    }

    /// Wrap a connection acquired by the caller.
    pub fn with_transport(transport: impl SyslogTransport + 'static) -> Self {
        Syslog {
            transport: Mutex::new(Box::new(transport)),
        }
    }
}

impl Logger for Syslog {
    fn log(&self, entry: &Entry<'_>) {
        let message = entry.message();
        let mut transport = self.transport.lock().unwrap_or_else(PoisonError::into_inner);
        let res = match entry.severity {
            Severity::Info => transport.info(&message),
            Severity::Debug => transport.debug(&message),
            Severity::Error => transport.err(&message),
            Severity::Critical => transport.crit(&message),
        };

        if let Err(e) = res {
            eprintln!("logr: syslog write failed, dropping {} message: {}", entry.severity, e);
        }
    }
}

fn process_name() -> String {
    std::env::args()
        .next()
        .as_deref()
        .and_then(|arg0| std::path::Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "logr".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Recorded {
        calls: Arc<Mutex<Vec<(&'static str, String)>>>,
        fail: bool,
    }

    impl Recorded {
        fn push(&self, method: &'static str, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
            self.calls.lock().unwrap().push((method, message.to_string()));
            if self.fail {
                Err("daemon went away".into())
            } else {
                Ok(())
            }
        }
    }

    impl SyslogTransport for Recorded {
        fn info(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
            self.push("info", message)
        }
        fn debug(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
            self.push("debug", message)
        }
        fn err(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
            self.push("err", message)
        }
        fn crit(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
            self.push("crit", message)
        }
    }

    #[test]
    fn levels_map_onto_syslog_severities() {
        let transport = Recorded::default();
        let calls = Arc::clone(&transport.calls);
        let logger = Syslog::with_transport(transport);

        logger.infof(format_args!("up {}", 1));
        logger.debugf(format_args!("poll"));
        logger.errorf(format_args!("failed to connect: {}", "timeout"));
        logger.criticalf(format_args!("disk full"));

        let calls = calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                ("info", "up 1".to_string()),
                ("debug", "poll".to_string()),
                ("err", "failed to connect: timeout".to_string()),
                ("crit", "disk full".to_string()),
            ]
        );
    }

    #[test]
    fn transport_failures_are_swallowed() {
        let transport = Recorded { fail: true, ..Default::default() };
        let calls = Arc::clone(&transport.calls);
        let logger = Syslog::with_transport(transport);

        logger.errorf(format_args!("still returns"));
        logger.errorf(format_args!("and again"));

        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn connecting_never_panics() {
        // Either outcome is fine; a missing daemon must come back as an error.
        match Syslog::new("billing", "1.2.0") {
            Ok(_) => {}
            Err(SyslogError::Unavailable(e)) => assert!(!e.to_string().is_empty()),
        }
    }

    #[test]
    fn process_name_is_not_empty() {
        assert!(!process_name().is_empty());
    }
}
