//! Pin assignment tables.
//!
//! Both tables are compile-time configuration: built once before
//! bootstrap, immutable afterwards. Assigning the same button to two
//! physical lines is a configuration error and is not validated at
//! runtime.

use crate::buttons::Button;

/// Association of one button with one physical input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    pub button: Button,
    pub pin: u8,
}

/// Physical line numbers that are not part of the button matrix.
///
/// Optional lines are `None` when the board doesn't wire them up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pinout {
    /// Console data line (Joybus).
    pub joybus_data: u8,
    /// DAC multiplexer select line.
    pub mux: Option<u8>,
    /// Nunchuk presence detect line.
    pub nunchuk_detect: Option<u8>,
    /// Nunchuk/display I2C data line.
    pub nunchuk_sda: Option<u8>,
    /// Nunchuk/display I2C clock line.
    pub nunchuk_scl: Option<u8>,
}
