//! Fixed-capacity line buffer
//!
//! A `fmt::Write` target that never grows past its capacity. Writes that do
//! not fit are cut at a UTF-8 boundary and reported as `fmt::Error`, which
//! also stops any formatting still in progress.

use std::fmt;

/// Bounded text buffer for one log line
#[derive(Debug)]
pub struct LineBuffer {
    text: String,
    capacity: usize,
    truncated: bool,
}

impl LineBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            capacity,
            truncated: false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes still available
    pub fn remaining(&self) -> usize {
        self.capacity - self.text.len()
    }

    /// Whether any write was cut short
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl fmt::Write for LineBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.remaining();
        if s.len() <= room {
            self.text.push_str(s);
            return Ok(());
        }

        let mut cut = room;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        self.text.push_str(&s[..cut]);
        self.truncated = true;
        Err(fmt::Error)
    }
}
