//! Diagnostic text lines
//!
//! Between stream frames the robot prints plain text: the boot banner after
//! a reset, battery messages while charging, echoes in debug builds. These
//! are collected a byte at a time into bounded lines.

use heapless::Vec;

/// Longest line kept before it is cut
pub const MAX_LINE_LEN: usize = 160;

/// Accumulates bytes into `\n`-terminated lines
///
/// A trailing `\r` is stripped. A line that reaches capacity is emitted as
/// is and the next byte starts a new line.
#[derive(Debug, Clone)]
pub struct LineReader<const N: usize = MAX_LINE_LEN> {
    buffer: Vec<u8, N>,
    complete: bool,
}

impl<const N: usize> Default for LineReader<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineReader<N> {
    /// Create an empty line reader
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            complete: false,
        }
    }

    /// Drop any partial line
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.complete = false;
    }

    /// Number of bytes buffered for the line in progress
    pub fn pending(&self) -> usize {
        if self.complete {
            0
        } else {
            self.buffer.len()
        }
    }

    /// Feed a single byte
    ///
    /// Returns the finished line when `byte` terminates it or fills the
    /// buffer. The returned slice is valid until the next call.
    pub fn feed(&mut self, byte: u8) -> Option<&[u8]> {
        if self.complete {
            self.clear();
        }

        if byte == b'\n' {
            if self.buffer.last() == Some(&b'\r') {
                self.buffer.pop();
            }
            self.complete = true;
            return Some(&self.buffer);
        }

        // Never fails: a full buffer is emitted below before the next push
        let _ = self.buffer.push(byte);
        if self.buffer.is_full() {
            self.complete = true;
            return Some(&self.buffer);
        }

        None
    }
}
