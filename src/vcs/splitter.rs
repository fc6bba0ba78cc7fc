//! Line splitting for VCS diagnostic output

use std::cmp;
use std::io;

use tokio_util::bytes::{Buf, BytesMut};
use tokio_util::codec::Decoder;

pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024 * 1024;

/// Decodes a byte stream into text lines.
///
/// A line ends at `\n`; a single `\r` immediately before it is dropped. At end
/// of data any unterminated remainder becomes one final line, but an empty
/// remainder produces nothing. Empty lines in the middle of the stream are
/// yielded as empty strings.
///
/// Lines longer than the maximum length are skipped entirely, so the buffer
/// never holds much more than one maximum-length line.
#[derive(Debug)]
pub struct LineSplitter {
    // Bytes already scanned for a newline, so long lines aren't rescanned.
    next_index: usize,
    max_length: usize,
    // Inside an oversized line, throwing bytes away until its newline
    discarding: bool,
}

impl Default for LineSplitter {
    fn default() -> Self {
        Self::with_max_length(DEFAULT_MAX_LINE_LENGTH)
    }
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            next_index: 0,
            max_length: max_length.max(1),
            discarding: false,
        }
    }
}

fn drop_cr(line: &[u8]) -> &[u8] {
    match line.split_last() {
        Some((b'\r', rest)) => rest,
        _ => line,
    }
}

fn to_text(line: &[u8]) -> String {
    String::from_utf8_lossy(drop_cr(line)).into_owned()
}

impl Decoder for LineSplitter {
    type Item = String;
    type Error = io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<String>, io::Error> {
        loop {
            // One byte past the limit is enough to tell a line is too long
            let read_to = cmp::min(self.max_length.saturating_add(1), buf.len());
            let offset = buf[self.next_index..read_to]
                .iter()
                .position(|b| *b == b'\n');

            match (self.discarding, offset) {
                (true, Some(offset)) => {
                    buf.advance(self.next_index + offset + 1);
                    self.next_index = 0;
                    self.discarding = false;
                }
                (true, None) => {
                    buf.advance(read_to);
                    self.next_index = 0;
                    if buf.is_empty() {
                        return Ok(None);
                    }
                }
                (false, Some(offset)) => {
                    let newline = self.next_index + offset;
                    self.next_index = 0;
                    let line = buf.split_to(newline + 1);
                    return Ok(Some(to_text(&line[..newline])));
                }
                (false, None) if buf.len() > self.max_length => {
                    tracing::debug!(max_length = self.max_length, "Dropping oversized line");
                    self.next_index = 0;
                    self.discarding = true;
                }
                (false, None) => {
                    self.next_index = read_to;
                    return Ok(None);
                }
            }
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<String>, io::Error> {
        if let Some(line) = self.decode(buf)? {
            return Ok(Some(line));
        }
        self.next_index = 0;
        if self.discarding {
            self.discarding = false;
            buf.clear();
            return Ok(None);
        }
        if buf.is_empty() {
            return Ok(None);
        }
        let rest = buf.split();
        Ok(Some(to_text(&rest)))
    }
}
