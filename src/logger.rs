use serde::Serialize;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Severity attached to every log call.
///
/// The set is closed: backends and the wire schema recognize exactly
/// these four values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Debug,
    Error,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Whether this severity triggers error reporting (location and
    /// stack trace capture) in backends that support it.
    pub fn is_report(self) -> bool {
        matches!(self, Severity::Error | Severity::Critical)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source location of the code that invoked a log method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite<'a> {
    pub file: &'a str,
    pub line: u32,
    /// Function name when the caller already knows it. Backends that need
    /// it resolve it from the stack otherwise.
    pub function: Option<&'a str>,
}

impl CallSite<'static> {
    /// Location of the caller of the enclosing `#[track_caller]` chain.
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }
}

impl From<&'static Location<'static>> for CallSite<'static> {
    fn from(location: &'static Location<'static>) -> Self {
        CallSite {
            file: location.file(),
            line: location.line(),
            function: None,
        }
    }
}

/// A single log event on its way to a backend.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    pub severity: Severity,
    pub args: fmt::Arguments<'a>,
    pub call_site: CallSite<'a>,
}

impl<'a> Entry<'a> {
    pub fn new(severity: Severity, args: fmt::Arguments<'a>, call_site: CallSite<'a>) -> Self {
        Entry { severity, args, call_site }
    }

    /// Resolve the format template and arguments into the final message.
    pub fn message(&self) -> String {
        match self.args.as_str() {
            Some(s) => s.to_string(),
            None => self.args.to_string(),
        }
    }
}

/// The four-method logging contract shared by every backend.
///
/// Each call performs exactly one synchronous emission and never reports
/// failure to the caller. Implementors only provide [`Logger::log`]; the
/// severity methods record the caller location and delegate to it.
pub trait Logger: Send + Sync {
    /// Emit one entry to the backend transport.
    fn log(&self, entry: &Entry<'_>);

    #[track_caller]
    fn infof(&self, args: fmt::Arguments<'_>) {
        self.log(&Entry::new(Severity::Info, args, CallSite::caller()));
    }

    #[track_caller]
    fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log(&Entry::new(Severity::Debug, args, CallSite::caller()));
    }

    #[track_caller]
    fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log(&Entry::new(Severity::Error, args, CallSite::caller()));
    }

    #[track_caller]
    fn criticalf(&self, args: fmt::Arguments<'_>) {
        self.log(&Entry::new(Severity::Critical, args, CallSite::caller()));
    }
}

impl<L: Logger + ?Sized> Logger for &L {
    fn log(&self, entry: &Entry<'_>) {
        (**self).log(entry)
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn log(&self, entry: &Entry<'_>) {
        (**self).log(entry)
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, entry: &Entry<'_>) {
        (**self).log(entry)
    }
}
