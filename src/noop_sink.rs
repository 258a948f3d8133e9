use crate::sink::LineSink;
use std::io;

/// A sink that simply drops all lines.
///
/// Useful for measuring the formatting overhead of a backend without any
/// I/O, and for tests that don't care about the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl LineSink for NoopSink {
    fn write_line(&self, _line: &str) -> io::Result<()> {
        Ok(())
    }
}
