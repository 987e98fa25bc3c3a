use std::io::Write;

use anyhow::{Context, Result};

/// A serialized payload plus the time the client needs to play it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedMessage {
    pub payload: String,
    pub delay_ms: u64,
}

/// Delivers compiled payloads to display clients.
pub trait Transport {
    fn send(&mut self, message: &QueuedMessage) -> Result<()>;
}

/// Writes one payload per line.
pub struct JsonLines<W: Write> {
    writer: W,
}

impl<W: Write> JsonLines<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Transport for JsonLines<W> {
    fn send(&mut self, message: &QueuedMessage) -> Result<()> {
        writeln!(self.writer, "{}", message.payload).context("Failed to write payload")?;
        self.writer.flush().context("Failed to flush payload")?;
        log::info!("Queued message, estimated playback {} ms", message.delay_ms);
        Ok(())
    }
}
