//! Logging setup: `tracing` events formatted once and handed to a line sink.
//!
//! # Design
//! - Reuse the `fmt` layer for formatting; the writer only splits output into lines.
//! - The sink is a plain function pointer so the subscriber stays `Send + Sync`;
//!   the browser passes one that writes to the console.
//! - No timestamps and no ANSI colours: the console adds its own.

use std::io::{self, Write};
use thiserror::Error;
use tracing::{Level, Metadata};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, MakeWriter};

/// Filter used when the configured directive does not parse.
pub const FALLBACK_FILTER: &str = "info";

/// Console severity a line is routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// `console.error`.
    Error,
    /// `console.warn`.
    Warn,
    /// `console.log`.
    Info,
    /// `console.debug`.
    Debug,
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }
}

/// Destination for one formatted log line.
pub type LineSink = fn(Severity, &str);

/// Failure installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber was already set.
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Install the global subscriber writing through `sink`.
///
/// # Errors
/// Returns [`TelemetryError::Install`] when a subscriber is already installed.
pub fn init_logging(filter: &str, sink: LineSink) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER));
    fmt::fmt()
        .with_env_filter(env_filter)
        .with_writer(LineMakeWriter::new(sink))
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .try_init()
        .map_err(|err| TelemetryError::Install(err.to_string()))
}

/// `MakeWriter` producing per-event line writers bound to a severity.
#[derive(Clone, Copy)]
pub struct LineMakeWriter {
    sink: LineSink,
}

impl LineMakeWriter {
    /// Writer factory for `sink`.
    #[must_use]
    pub const fn new(sink: LineSink) -> Self {
        Self { sink }
    }
}

impl<'a> MakeWriter<'a> for LineMakeWriter {
    type Writer = LineWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LineWriter::new(self.sink, Severity::Info)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        LineWriter::new(self.sink, Severity::from(*meta.level()))
    }
}

/// Buffers formatter output and emits complete lines to the sink.
pub struct LineWriter {
    sink: LineSink,
    severity: Severity,
    buffer: LineBuffer,
}

impl LineWriter {
    const fn new(sink: LineSink, severity: Severity) -> Self {
        Self {
            sink,
            severity,
            buffer: LineBuffer::new(),
        }
    }

    fn emit(&self, line: &str) {
        if !line.is_empty() {
            (self.sink)(self.severity, line);
        }
    }
}

impl Write for LineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for line in self.buffer.push(buf) {
            self.emit(&line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for LineWriter {
    fn drop(&mut self) {
        if let Some(line) = self.buffer.finish() {
            self.emit(&line);
        }
    }
}

struct LineBuffer {
    buffer: Vec<u8>,
}

impl LineBuffer {
    const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);
        let mut lines = Vec::new();
        while let Some(idx) = self.buffer.iter().position(|byte| *byte == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=idx).collect();
            lines.push(trim_line(&String::from_utf8_lossy(&line)));
        }
        lines
    }

    fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let line = trim_line(&String::from_utf8_lossy(&self.buffer));
        self.buffer.clear();
        Some(line)
    }
}

fn trim_line(line: &str) -> String {
    line.trim_end_matches(['\r', '\n']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    thread_local! {
        static CAPTURED: RefCell<Vec<(Severity, String)>> = const { RefCell::new(Vec::new()) };
    }

    fn capture(severity: Severity, line: &str) {
        CAPTURED.with(|lines| lines.borrow_mut().push((severity, line.to_string())));
    }

    fn take() -> Vec<(Severity, String)> {
        CAPTURED.with(|lines| std::mem::take(&mut *lines.borrow_mut()))
    }

    #[test]
    fn line_buffer_splits_and_keeps_partial() {
        let mut buffer = LineBuffer::new();
        assert_eq!(buffer.push(b"alpha\r\nbe"), vec!["alpha".to_string()]);
        assert_eq!(buffer.push(b"ta\n"), vec!["beta".to_string()]);
        assert!(buffer.finish().is_none());
        let _ = buffer.push(b"tail");
        assert_eq!(buffer.finish(), Some("tail".to_string()));
    }

    #[test]
    fn writer_emits_lines_and_flushes_on_drop() {
        take();
        {
            let mut writer = LineWriter::new(capture, Severity::Warn);
            writer.write_all(b"first\nsecond").expect("write");
        }
        assert_eq!(
            take(),
            vec![
                (Severity::Warn, "first".to_string()),
                (Severity::Warn, "second".to_string())
            ]
        );
    }

    #[test]
    fn events_route_by_level() {
        take();
        let subscriber = fmt::fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_writer(LineMakeWriter::new(capture))
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("boom");
            tracing::info!(count = 2, "loaded");
        });
        let lines = take();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, Severity::Error);
        assert!(lines[0].1.contains("boom"));
        assert_eq!(lines[1].0, Severity::Info);
        assert!(lines[1].1.contains("count=2"));
    }

    #[test]
    fn levels_map_to_severity() {
        assert_eq!(Severity::from(Level::TRACE), Severity::Debug);
        assert_eq!(Severity::from(Level::WARN), Severity::Warn);
    }
}
