//! Output sinks the renderer writes through.
//!
//! Dot-mode rendering flushes after every character so a consumer
//! tailing the stream sees progress before the run completes.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Incremental text sink. `writeln` has a default in terms of
/// `write_str`; `flush` must make everything written so far visible.
pub trait OutputSink {
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    fn writeln(&mut self, text: &str) -> io::Result<()> {
        self.write_str(text)?;
        self.write_str("\n")
    }

    fn flush(&mut self) -> io::Result<()>;
}

impl<T: OutputSink + ?Sized> OutputSink for Box<T> {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        (**self).write_str(text)
    }

    fn writeln(&mut self, text: &str) -> io::Result<()> {
        (**self).writeln(text)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Writes to stdout for default runner use.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        io::stdout().write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

/// Collects output into a shared string for testing or programmatic
/// capture. Clones observe the same buffer, so a handle kept by the
/// caller still reads everything written after the sink was handed to a
/// renderer.
#[derive(Debug, Clone, Default)]
pub struct OutputBuffer {
    inner: Arc<Mutex<String>>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far.
    pub fn contents(&self) -> String {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, String> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OutputSink for OutputBuffer {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.lock().push_str(text);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
