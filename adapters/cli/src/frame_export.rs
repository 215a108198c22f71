use std::io::{self, Write};

use hex_microbes_core::Frame;

/// Streams frames as JSON lines, one object per tick boundary.
#[derive(Debug)]
pub(crate) struct FrameWriter<W: Write> {
    inner: W,
    written: u32,
}

impl<W: Write> FrameWriter<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub(crate) fn write(&mut self, frame: &Frame) -> io::Result<()> {
        serde_json::to_writer(&mut self.inner, frame)?;
        self.inner.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Flushes buffered output and reports how many frames were written.
    pub(crate) fn finish(mut self) -> io::Result<u32> {
        self.inner.flush()?;
        Ok(self.written)
    }
}
