//! Line-bounded trace reader.
//!
//! Reads a trace the way a fixed `fgets` buffer of
//! [`LINE_BUFFER_LEN`](crate::config::defaults::LINE_BUFFER_LEN) bytes would:
//! each read takes at most `LINE_BUFFER_LEN - 1` bytes and must end in a
//! newline. A line that fills the buffer without a newline, or a final line
//! with no newline at all, is rejected.

use std::io::{BufRead, Read};

use super::TraceRecord;
use crate::common::{ParseError, ParseErrorKind, SimError};
use crate::config::defaults::LINE_BUFFER_LEN;

/// Iterator over the records of a trace.
///
/// Yields `Err` at most once; iteration ends after the first error.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
    done: bool,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered byte stream.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(LINE_BUFFER_LEN),
            line: 0,
            done: false,
        }
    }

    /// Number of lines consumed so far.
    pub const fn line_number(&self) -> usize {
        self.line
    }

    /// Reads and parses the next line.
    ///
    /// Returns `Ok(None)` at a clean end of stream.
    ///
    /// # Errors
    ///
    /// [`SimError::Read`] if the underlying stream fails, [`SimError::Parse`]
    /// if the line is too long, unterminated, or malformed.
    pub fn next_record(&mut self) -> Result<Option<TraceRecord>, SimError> {
        self.buf.clear();
        let limit = (LINE_BUFFER_LEN - 1) as u64;
        let read = (&mut self.reader)
            .take(limit)
            .read_until(b'\n', &mut self.buf)
            .map_err(SimError::Read)?;
        if read == 0 {
            return Ok(None);
        }
        self.line += 1;
        let line = self.line;
        let reject = |kind| SimError::Parse(ParseError { line, kind });

        let Some(content) = self.buf.strip_suffix(b"\n") else {
            return Err(reject(if read as u64 == limit {
                ParseErrorKind::LineTooLong(LINE_BUFFER_LEN - 1)
            } else {
                ParseErrorKind::MissingNewline
            }));
        };
        let text = std::str::from_utf8(content).map_err(|_| reject(ParseErrorKind::NotUtf8))?;
        TraceRecord::parse(text).map(Some).map_err(reject)
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, SimError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
