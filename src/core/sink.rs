use std::io::{BufWriter, Write};

use crate::error::{JsonError, JsonResult};

/// A character output with an explicit flush.
pub trait CharSink {
    fn write_char(&mut self, c: char) -> JsonResult<()>;

    fn write_str(&mut self, s: &str) -> JsonResult<()>;

    fn flush(&mut self) -> JsonResult<()> {
        Ok(())
    }
}

impl CharSink for String {
    fn write_char(&mut self, c: char) -> JsonResult<()> {
        self.push(c);
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> JsonResult<()> {
        self.push_str(s);
        Ok(())
    }
}

impl<S: CharSink + ?Sized> CharSink for &mut S {
    fn write_char(&mut self, c: char) -> JsonResult<()> {
        (**self).write_char(c)
    }

    fn write_str(&mut self, s: &str) -> JsonResult<()> {
        (**self).write_str(s)
    }

    fn flush(&mut self) -> JsonResult<()> {
        (**self).flush()
    }
}

/// UTF-8 encodes characters into any [`Write`] through a [`BufWriter`].
pub struct IoSink<W: Write> {
    stream: BufWriter<W>,
}

impl<W: Write> IoSink<W> {
    pub fn new(wtr: W) -> Self {
        Self::with_capacity(8 * 1024, wtr)
    }

    pub fn with_capacity(capacity: usize, wtr: W) -> Self {
        Self {
            stream: BufWriter::with_capacity(capacity, wtr),
        }
    }

    /// Flushes the buffer and hands back the underlying writer.
    pub fn into_inner(self) -> JsonResult<W> {
        self.stream
            .into_inner()
            .map_err(|error| JsonError::Io(error.into_error()))
    }
}

impl<W: Write> CharSink for IoSink<W> {
    fn write_char(&mut self, c: char) -> JsonResult<()> {
        let mut buffer = [0; 4];
        self.stream.write_all(c.encode_utf8(&mut buffer).as_bytes())?;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> JsonResult<()> {
        self.stream.write_all(s.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> JsonResult<()> {
        self.stream.flush()?;
        Ok(())
    }
}
