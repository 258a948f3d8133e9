use crate::logger::{Entry, Logger};
use crate::sink::{emit, LineSink, StdoutSink};
use std::convert::Infallible;
use std::sync::Arc;

/// Plain-text backend for local runs: `"<LEVEL>: <message>"`, one line
/// per call.
#[derive(Clone)]
pub struct Console {
    sink: Arc<dyn LineSink>,
}

impl Console {
    /// Console backend writing to stdout.
    ///
    /// `daemon` and `version` are accepted so every backend shares the
    /// same constructor shape; the console output does not include them.
    pub fn new(daemon: &str, version: &str) -> Result<Self, Infallible> {
        let _ = (daemon, version);
        Ok(Self::with_sink(Arc::new(StdoutSink)))
    }

    pub fn with_sink(sink: Arc<dyn LineSink>) -> Self {
        Console { sink }
    }
}

impl Logger for Console {
    fn log(&self, entry: &Entry<'_>) {
        let line = format!("{}: {}", entry.severity, entry.args);
        emit(&*self.sink, &line);
    }
}
