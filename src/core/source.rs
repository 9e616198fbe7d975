use std::{
    io::{BufRead, BufReader, ErrorKind, Read},
    str::Chars,
};

use crate::error::{JsonError, JsonResult};

/// A pull-one-character input.
///
/// `Ok(None)` reports end of input; it is never a valid character.
pub trait CharSource {
    fn next_char(&mut self) -> JsonResult<Option<char>>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn next_char(&mut self) -> JsonResult<Option<char>> {
        (**self).next_char()
    }
}

/// Characters of an in-memory string.
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
        }
    }
}

impl CharSource for StrSource<'_> {
    fn next_char(&mut self) -> JsonResult<Option<char>> {
        Ok(self.chars.next())
    }
}

/// Decodes UTF-8 from any [`Read`] one character at a time.
///
/// Invalid UTF-8 is reported as an [`ErrorKind::InvalidData`] I/O error.
pub struct ReadSource<R> {
    reader: BufReader<R>,
}

impl<R: Read> ReadSource<R> {
    pub fn new(rdr: R) -> Self {
        Self::with_capacity(8 * 1024, rdr)
    }

    /// A zero `capacity` is raised to one byte; an empty buffer would read
    /// as end of input.
    pub fn with_capacity(capacity: usize, rdr: R) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity.max(1), rdr),
        }
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    fn next_byte(&mut self) -> JsonResult<Option<u8>> {
        let byte = loop {
            match self.reader.fill_buf() {
                Ok(buffer) => break buffer.first().copied(),
                Err(error) if error.kind() == ErrorKind::Interrupted => continue,
                Err(error) => return Err(JsonError::Io(error)),
            }
        };
        if byte.is_some() {
            self.reader.consume(1);
        }
        Ok(byte)
    }
}

fn invalid_utf8() -> JsonError {
    JsonError::Io(std::io::Error::new(
        ErrorKind::InvalidData,
        "stream did not contain valid UTF-8",
    ))
}

impl<R: Read> CharSource for ReadSource<R> {
    fn next_char(&mut self) -> JsonResult<Option<char>> {
        let Some(lead) = self.next_byte()? else {
            return Ok(None);
        };

        let width = match lead {
            0x00..=0x7f => return Ok(Some(char::from(lead))),
            0xc2..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf4 => 4,
            _ => return Err(invalid_utf8()),
        };

        let mut bytes = [lead, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            *slot = self.next_byte()?.ok_or_else(invalid_utf8)?;
        }

        std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(invalid_utf8)
    }
}
