//! Multi-protocol controller firmware for RP2040.
//!
//! This crate wires the orchestration core to the Pico hardware: a
//! direct-wired button matrix, the Joybus console line, USB device
//! classes, a Wii Nunchuk and an SSD1306 status display.
//!
//! # Architecture
//!
//! The two cores are the two execution contexts:
//!
//! - **Core 0** runs bootstrap (hold detection, firmware-update
//!   interlock, console probe, backend construction) and then the
//!   report loop, plus the USB device task when a USB backend was
//!   selected.
//! - **Core 1** spins on the readiness gate, then owns the shared I2C
//!   bus (display + Nunchuk) and runs the status loop.
//!
//! The cores share exactly two things: the readiness gate and the live
//! [`InputSnapshot`](crossbox_core::InputSnapshot) behind it. See the
//! core crate for the synchronization contract.
//!
//! # Hardware Configuration
//!
//! | Function     | GPIO       | Description                      |
//! |--------------|------------|----------------------------------|
//! | Buttons      | see config | Direct-wired, pulled up          |
//! | Joybus data  | 28         | GameCube/N64 console line        |
//! | I2C0 SDA/SCL | 8 / 9      | SSD1306 display + Nunchuk        |
//! | LED          | 25         | On-board LED (boot indicator)    |
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)

#![no_std]

pub mod backends;
pub mod config;
pub mod gpio_input;
pub mod joybus;
pub mod mode_select;
pub mod nunchuk;
pub mod oled;
pub mod usb;

pub use backends::Backend;
pub use gpio_input::GpioButtonInput;
pub use mode_select::ModeSelector;
pub use nunchuk::NunchukInput;
pub use oled::OledStatus;
