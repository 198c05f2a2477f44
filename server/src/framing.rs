//! Transport framing for the newline-delimited text protocol.
//!
//! Bytes arrive from the socket in arbitrary chunks with no length prefix.
//! Each connection accumulates decoded text in a growable buffer and only
//! ever consumes complete, delimiter-terminated messages from its front; a
//! trailing partial message stays in place, untouched, until the next
//! arrival completes it.

use shared::DELIMITER;

/// Size of the fixed receive buffer handed to every socket read.
pub const RECEIVE_BUFFER_SIZE: usize = 8000;

/// Growable per-connection text buffer reassembling messages across reads.
#[derive(Debug, Default)]
pub struct MessageBuffer {
    data: String,
}

impl MessageBuffer {
    pub fn new() -> Self {
        MessageBuffer {
            data: String::new(),
        }
    }

    /// Decodes one received chunk as UTF-8 text and appends it. It may be an
    /// incomplete message, so the buffer builds messages up piece by piece.
    pub fn push_chunk(&mut self, bytes: &[u8]) {
        self.data.push_str(&String::from_utf8_lossy(bytes));
    }

    /// Extracts every complete message currently buffered, in order.
    ///
    /// Returned messages keep their trailing delimiter. Anything after the
    /// last delimiter is an incomplete message and is left in the buffer.
    /// Empty fragments from adjacent delimiters are consumed but produce no
    /// message.
    pub fn extract_messages(&mut self) -> Vec<String> {
        let mut messages = Vec::new();

        let consumable = match self.data.rfind(DELIMITER) {
            Some(index) => index + DELIMITER.len_utf8(),
            None => return messages,
        };

        let complete: String = self.data.drain(..consumable).collect();
        for piece in complete.split_inclusive(DELIMITER) {
            if piece.len() == DELIMITER.len_utf8() {
                continue;
            }
            messages.push(piece.to_string());
        }

        messages
    }

    /// Text still waiting for its delimiter.
    pub fn pending(&self) -> &str {
        &self.data
    }
}
