//! Button-to-HID-keycode mapping for the keyboard emulation mode.

use crossbox_core::{Button, Buttons};

/// Keys per report (6-key rollover).
pub const ROLLOVER: usize = 6;

/// Fixed button-to-usage-ID table, scanned in [`Button::ALL`] order.
const KEYMAP: [(Button, u8); Button::COUNT] = [
    (Button::A, 0x04),           // a
    (Button::B, 0x05),           // b
    (Button::X, 0x1B),           // x
    (Button::Y, 0x1C),           // y
    (Button::Z, 0x1D),           // z
    (Button::L, 0x14),           // q
    (Button::R, 0x1A),           // w
    (Button::Up, 0x52),          // Up Arrow
    (Button::Down, 0x51),        // Down Arrow
    (Button::Left, 0x50),        // Left Arrow
    (Button::Right, 0x4F),       // Right Arrow
    (Button::CUp, 0x0C),         // i
    (Button::CDown, 0x0E),       // k
    (Button::CLeft, 0x0D),       // j
    (Button::CRight, 0x0F),      // l
    (Button::ModX, 0x19),        // v
    (Button::ModY, 0x11),        // n
    (Button::Start, 0x28),       // Enter
    (Button::Select, 0x29),      // Escape
    (Button::Home, 0x0B),        // h
    (Button::LightShield, 0x08), // e
    (Button::MidShield, 0x15),   // r
];

/// Build the keycode array for one frame.
///
/// The first [`ROLLOVER`] pressed buttons in table order land in the
/// report; the rest are dropped, as 6KRO demands.
#[must_use]
pub fn keycodes(frame: Buttons) -> [u8; ROLLOVER] {
    let mut codes = [0u8; ROLLOVER];
    let mut n = 0;
    for (button, code) in KEYMAP {
        if n == ROLLOVER {
            break;
        }
        if frame.contains(button) {
            codes[n] = code;
            n += 1;
        }
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_frame_is_all_zero() {
        assert_eq!(keycodes(Buttons::NONE), [0; ROLLOVER]);
    }

    #[test]
    fn test_pressed_buttons_in_table_order() {
        let frame = Buttons::NONE.with(Button::Start).with(Button::A);
        assert_eq!(keycodes(frame), [0x04, 0x28, 0, 0, 0, 0]);
    }

    #[test]
    fn test_rollover_limit() {
        let mut frame = Buttons::NONE;
        for button in [
            Button::A,
            Button::B,
            Button::X,
            Button::Y,
            Button::Z,
            Button::L,
            Button::R,
        ] {
            frame.set(button, true);
        }
        // Seven pressed, six slots: w (R) is dropped.
        assert_eq!(keycodes(frame), [0x04, 0x05, 0x1B, 0x1C, 0x1D, 0x14]);
    }

    #[test]
    fn test_every_button_has_a_distinct_key() {
        let mut seen = [false; 256];
        for (_, code) in KEYMAP {
            assert!(!seen[code as usize]);
            seen[code as usize] = true;
        }
    }
}
