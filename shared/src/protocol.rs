//! Wire protocol: newline-delimited text messages.
//!
//! After the name/id handshake the server streams one JSON object per entity
//! per tick. Each record carries exactly one discriminant key ("ship",
//! "proj" or "star") holding the entity id; the receiver decides which type
//! to decode by looking at which key is present. Client control messages are
//! not JSON: a line like `(RT)` listing the active control tokens.

use crate::entities::{Projectile, Ship, Star};
use serde::Deserialize;

/// Every logical message on the wire ends with this delimiter.
pub const DELIMITER: char = '\n';

/// One decoded snapshot record, discriminated by which id key was present.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireRecord {
    Ship(Ship),
    Projectile(Projectile),
    Star(Star),
}

/// Decodes a single snapshot line. The trailing delimiter may be present.
pub fn decode_record(line: &str) -> Result<WireRecord, serde_json::Error> {
    serde_json::from_str(line.trim_end_matches(DELIMITER))
}

/// Client-side control intent for one frame.
///
/// The desktop shell only toggles these flags; encoding keeps the tokens in
/// the fixed R, L, F, T order the server and tests rely on.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlInput {
    pub turn_right: bool,
    pub turn_left: bool,
    pub fire: bool,
    pub thrust: bool,
}

impl ControlInput {
    /// Builds the control string for this frame, or `None` when no control
    /// is active (the client sends nothing at all in that case).
    pub fn encode(&self) -> Option<String> {
        if !(self.turn_right || self.turn_left || self.fire || self.thrust) {
            return None;
        }

        let mut message = String::from("(");
        if self.turn_right {
            message.push('R');
        }
        if self.turn_left {
            message.push('L');
        }
        if self.fire {
            message.push('F');
        }
        if self.thrust {
            message.push('T');
        }
        message.push(')');
        Some(message)
    }
}
