use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Line-oriented destination for formatted log output.
///
/// Backends that emit text (console, cloud JSON) hand each finished line
/// to a `LineSink`. Implementations append the line terminator themselves
/// and must tolerate concurrent callers; the backends add no locking of
/// their own.
pub trait LineSink: Send + Sync {
    /// Write a single line to the underlying transport.
    ///
    /// **Returns**
    /// - `Ok(())` once the whole line was handed to the transport.
    /// - `Err(..)` if the transport rejected the write. Backends swallow
    ///   this after a best-effort diagnostic.
    fn write_line(&self, line: &str) -> io::Result<()>;
}

/// Process standard output. The stdout lock is held for one line so
/// concurrent emissions never interleave inside a line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl LineSink for StdoutSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()
    }
}

/// Keeps every written line in memory, without terminators.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Drain the captured lines.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl LineSink for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
        Ok(())
    }
}

/// Hand a line to `sink`, reporting a failed write on stderr.
pub(crate) fn emit(sink: &dyn LineSink, line: &str) {
    if let Err(e) = sink.write_line(line) {
        eprintln!("logr: dropping log line, write failed: {}", e);
    }
}
