//! Command framing for the PTU serial protocol.
//!
//! Every command is a fixed 8-byte frame:
//!
//! ```text
//! [0xFF, pan_high, pan_low, tilt_high, tilt_low, 0x00, opcode, checksum]
//! ```
//!
//! The checksum makes bytes 1..=7 sum to 255 modulo 256.

use crate::constants::*;
use crate::error::InvalidRange;
use crate::types::{Axis, Position};

/// Splits a 16-bit field into its `(low, high)` bytes.
pub fn to_two_bytes(value: u16) -> (u8, u8) {
    ((value & 0xff) as u8, ((value & 0xff00) >> 8) as u8)
}

fn checksum(body: &[u8]) -> u8 {
    let sum = body.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    0xff - sum
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandPacket([u8; PACKET_SIZE]);

impl CommandPacket {
    pub fn encode(pan: u16, tilt: u16, opcode: u8) -> Self {
        let (pan_low, pan_high) = to_two_bytes(pan);
        let (tilt_low, tilt_high) = to_two_bytes(tilt);

        let mut frame = [
            HEADER, pan_high, pan_low, tilt_high, tilt_low, BUTTON, opcode, 0,
        ];
        frame[7] = checksum(&frame[1..7]);
        CommandPacket(frame)
    }

    /// Absolute move frame. Coordinates that do not fit a 16-bit field are
    /// refused rather than truncated.
    pub fn move_absolute(position: Position) -> Result<Self, InvalidRange> {
        let field = |axis: Axis| {
            let requested = position.get(axis);
            u16::try_from(requested).map_err(|_| InvalidRange {
                axis,
                requested,
                bounds: 0..=i32::from(u16::MAX),
            })
        };
        Ok(Self::encode(field(Axis::Pan)?, field(Axis::Tilt)?, CMD_MOVE_ABSOLUTE))
    }

    pub fn as_bytes(&self) -> &[u8; PACKET_SIZE] {
        &self.0
    }

    pub fn opcode(&self) -> u8 {
        self.0[6]
    }

    pub fn pan(&self) -> u16 {
        u16::from(self.0[1]) << 8 | u16::from(self.0[2])
    }

    pub fn tilt(&self) -> u16 {
        u16::from(self.0[3]) << 8 | u16::from(self.0[4])
    }

    /// Accepts a raw frame only if the header and checksum are intact.
    pub fn verify(bytes: &[u8]) -> Option<Self> {
        let frame: [u8; PACKET_SIZE] = bytes.try_into().ok()?;
        if frame[0] != HEADER || checksum(&frame[1..7]) != frame[7] {
            return None;
        }
        Some(CommandPacket(frame))
    }
}
