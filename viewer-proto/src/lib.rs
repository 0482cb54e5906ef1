//! Wire format of the passive input-viewer backend.
//!
//! The viewer mirrors the live button state to a desktop overlay over a
//! serial link. The format is deliberately trivial so any serial
//! monitor can eyeball it: one ASCII `'0'`/`'1'` per button in a fixed
//! order, terminated by a newline, at most one frame per report cycle.
//!
//! ```text
//! <a><b><x><y><z><l><r>...<midshield>\n
//! ```
//!
//! The order is part of the wire contract with the overlay and must not
//! change between releases.
//!
//! # Example
//!
//! ```
//! use crossbox_core::{Button, Buttons};
//! use viewer_proto::{encode, FRAME_LEN};
//!
//! let mut buf = [0u8; FRAME_LEN];
//! encode(Buttons::NONE.with(Button::A), &mut buf);
//! assert_eq!(buf[0], b'1');
//! assert_eq!(buf[FRAME_LEN - 1], b'\n');
//! ```
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

use crossbox_core::{Button, Buttons};

/// Buttons per frame.
pub const BUTTON_COUNT: usize = Button::COUNT;

/// Encoded frame length: one byte per button plus the newline.
pub const FRAME_LEN: usize = BUTTON_COUNT + 1;

/// Wire order of the button flags.
///
/// Matches the overlay's left-to-right layout rather than the internal
/// bit order.
pub const REPORT_ORDER: [Button; BUTTON_COUNT] = [
    Button::A,
    Button::B,
    Button::X,
    Button::Y,
    Button::Z,
    Button::L,
    Button::R,
    Button::Up,
    Button::Down,
    Button::Left,
    Button::Right,
    Button::CUp,
    Button::CDown,
    Button::CLeft,
    Button::CRight,
    Button::ModX,
    Button::ModY,
    Button::Start,
    Button::Select,
    Button::Home,
    Button::LightShield,
    Button::MidShield,
];

/// Encode one frame into the buffer.
pub fn encode(frame: Buttons, buf: &mut [u8; FRAME_LEN]) {
    for (slot, button) in buf.iter_mut().zip(REPORT_ORDER) {
        *slot = if frame.contains(button) { b'1' } else { b'0' };
    }
    buf[FRAME_LEN - 1] = b'\n';
}

/// Encode one frame into a fresh buffer.
#[must_use]
pub fn encode_frame(frame: Buttons) -> [u8; FRAME_LEN] {
    let mut buf = [0u8; FRAME_LEN];
    encode(frame, &mut buf);
    buf
}

/// Error type for frame decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Frame is not [`FRAME_LEN`] bytes or lacks the terminator.
    Framing,
    /// A flag byte is neither `'0'` nor `'1'`.
    BadFlag,
}

/// Decode one frame (the overlay side of the contract).
pub fn decode(buf: &[u8]) -> Result<Buttons, DecodeError> {
    if buf.len() != FRAME_LEN || buf[FRAME_LEN - 1] != b'\n' {
        return Err(DecodeError::Framing);
    }
    let mut frame = Buttons::NONE;
    for (&byte, button) in buf.iter().zip(REPORT_ORDER) {
        match byte {
            b'1' => frame.set(button, true),
            b'0' => {}
            _ => return Err(DecodeError::BadFlag),
        }
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_frame_is_all_zeros() {
        let buf = encode_frame(Buttons::NONE);
        assert_eq!(&buf[..BUTTON_COUNT], &[b'0'; BUTTON_COUNT]);
        assert_eq!(buf[BUTTON_COUNT], b'\n');
    }

    #[test]
    fn test_flags_land_in_wire_order() {
        let frame = Buttons::NONE
            .with(Button::A)
            .with(Button::Z)
            .with(Button::MidShield);
        let buf = encode_frame(frame);
        assert_eq!(buf[0], b'1'); // A leads
        assert_eq!(buf[4], b'1'); // Z is fifth
        assert_eq!(buf[BUTTON_COUNT - 1], b'1'); // MidShield trails
        assert_eq!(buf.iter().filter(|&&b| b == b'1').count(), 3);
    }

    #[test]
    fn test_report_order_covers_every_button_once() {
        let mut seen = 0u32;
        for button in REPORT_ORDER {
            assert_eq!(seen >> button.index() & 1, 0);
            seen |= 1 << button.index();
        }
        assert_eq!(seen.count_ones() as usize, BUTTON_COUNT);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(decode(b"101"), Err(DecodeError::Framing));

        let mut buf = encode_frame(Buttons::NONE);
        buf[3] = b'2';
        assert_eq!(decode(&buf), Err(DecodeError::BadFlag));
    }

    #[test]
    fn test_decode_matches_encode() {
        let frame = Buttons::NONE.with(Button::ModX).with(Button::CDown);
        assert_eq!(decode(&encode_frame(frame)), Ok(frame));
    }
}
