//! Board configuration: button map, pinout, display layout.
//!
//! All tables here are compile-time data. The button map order is the
//! order the GPIO inputs are constructed in `main`; the two must stay
//! in sync.

use crossbox_core::{Button, PinAssignment, Pinout, Region};

/// Button-to-GPIO assignment for the stock board.
pub static BUTTON_MAP: [PinAssignment; Button::COUNT] = [
    PinAssignment { button: Button::L, pin: 5 },
    PinAssignment { button: Button::Left, pin: 4 },
    PinAssignment { button: Button::Down, pin: 3 },
    PinAssignment { button: Button::Right, pin: 2 },
    PinAssignment { button: Button::ModX, pin: 6 },
    PinAssignment { button: Button::ModY, pin: 7 },
    PinAssignment { button: Button::Select, pin: 10 },
    PinAssignment { button: Button::Start, pin: 0 },
    PinAssignment { button: Button::Home, pin: 11 },
    PinAssignment { button: Button::CLeft, pin: 13 },
    PinAssignment { button: Button::CUp, pin: 12 },
    PinAssignment { button: Button::CDown, pin: 15 },
    PinAssignment { button: Button::A, pin: 14 },
    PinAssignment { button: Button::CRight, pin: 16 },
    PinAssignment { button: Button::B, pin: 26 },
    PinAssignment { button: Button::X, pin: 21 },
    PinAssignment { button: Button::Z, pin: 19 },
    PinAssignment { button: Button::Up, pin: 17 },
    PinAssignment { button: Button::R, pin: 27 },
    PinAssignment { button: Button::Y, pin: 22 },
    PinAssignment { button: Button::LightShield, pin: 20 },
    PinAssignment { button: Button::MidShield, pin: 18 },
];

/// Non-matrix lines. The Nunchuk shares the display's I2C bus, so it
/// has no lines of its own beyond the detect pin (not fitted here).
pub const PINOUT: Pinout = Pinout {
    joybus_data: 28,
    mux: None,
    nunchuk_detect: None,
    nunchuk_sda: Some(8),
    nunchuk_scl: Some(9),
};

/// Chosen indicator arrangement per screen region.
pub const DISPLAY_LAYOUT: [(Region, &str); 3] = [
    (Region::LeftHand, "b0xx"),
    (Region::Thumbs, "b0xx"),
    (Region::RightHand, "b0xx"),
];

/// I2C clock for the display/Nunchuk bus.
pub const I2C_HZ: u32 = 400_000;
