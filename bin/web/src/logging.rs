//! Tracing output for the browser client.
//!
//! The browser has no stdout, so events are formatted by
//! `tracing_subscriber::fmt` and each finished line is handed to a sink,
//! which in the browser is `console.log`.

use std::io;
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::fmt;
use tracing_subscriber::registry::LookupSpan;

/// Filter installed at startup.
pub const DEFAULT_FILTER: &str = "info";

/// Collects one formatted event and passes it to `sink` when dropped.
pub struct ConsoleWriter {
    buffer: Vec<u8>,
    sink: fn(&str),
}

impl ConsoleWriter {
    /// Creates a writer that emits to `sink`.
    #[must_use]
    pub fn new(sink: fn(&str)) -> Self {
        Self {
            buffer: Vec::new(),
            sink,
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = line.trim_end();
        if !line.is_empty() {
            (self.sink)(line);
        }
    }
}

/// A formatting layer without timestamps or colours, writing to `sink`.
pub fn layer<S>(sink: fn(&str)) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(move || ConsoleWriter::new(sink))
}

/// Installs the console subscriber. Later calls leave the first in place.
#[cfg(feature = "csr")]
pub fn init() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let installed = tracing_subscriber::registry()
        .with(EnvFilter::new(DEFAULT_FILTER))
        .with(layer(console_sink))
        .try_init();
    if let Err(e) = installed {
        leptos::logging::warn!("tracing subscriber not installed: {e}");
    }
}

#[cfg(feature = "csr")]
fn console_sink(line: &str) {
    web_sys::console::log_1(&line.into());
}
