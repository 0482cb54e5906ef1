//! Nintendo Switch USB backend, forced by holding X at plug-in.

use crossbox_core::{
    CommunicationBackend, ControlOutput, GameMode, InputSnapshot, InputSource, ReportError,
};
use crossbox_modes::ActiveMode;

use crate::gpio_input::GpioButtonInput;
use crate::usb::GamepadWriter;

/// Hat value for "no direction".
const HAT_NEUTRAL: u8 = 8;

/// Wire report matching [`crate::usb::SWITCH_DESCRIPTOR`].
///
/// Total size: 8 bytes (buttons: 2, hat: 1, axes: 4x1, vendor: 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwitchReport {
    pub buttons: u16,
    pub hat: u8,
    pub stick_x: u8,
    pub stick_y: u8,
    pub cstick_x: u8,
    pub cstick_y: u8,
}

impl SwitchReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 8;

    /// Convert the report to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let b = self.buttons.to_le_bytes();
        [
            b[0],
            b[1],
            self.hat,
            self.stick_x,
            self.stick_y,
            self.cstick_x,
            self.cstick_y,
            0,
        ]
    }
}

fn hat(up: bool, right: bool, down: bool, left: bool) -> u8 {
    match (up, right, down, left) {
        (true, false, false, false) => 0,
        (true, true, false, false) => 1,
        (false, true, false, false) => 2,
        (false, true, true, false) => 3,
        (false, false, true, false) => 4,
        (false, false, true, true) => 5,
        (false, false, false, true) => 6,
        (true, false, false, true) => 7,
        _ => HAT_NEUTRAL,
    }
}

impl From<&ControlOutput> for SwitchReport {
    fn from(out: &ControlOutput) -> Self {
        let mut buttons = 0u16;
        for (bit, pressed) in [
            (0, out.y),
            (1, out.b),
            (2, out.a),
            (3, out.x),
            (5, out.z),         // R
            (6, out.l),         // ZL
            (7, out.r),         // ZR
            (8, out.select),    // Minus
            (9, out.start),     // Plus
            (12, out.home),
        ] {
            if pressed {
                buttons |= 1 << bit;
            }
        }
        Self {
            buttons,
            hat: hat(out.dpad_up, out.dpad_right, out.dpad_down, out.dpad_left),
            stick_x: out.stick_x,
            stick_y: out.stick_y,
            cstick_x: out.cstick_x,
            cstick_y: out.cstick_y,
        }
    }
}

pub struct SwitchBackend {
    gpio: GpioButtonInput,
    snapshot: &'static InputSnapshot,
    mode: Option<ActiveMode>,
    writer: GamepadWriter,
}

impl SwitchBackend {
    #[must_use]
    pub fn new(
        gpio: GpioButtonInput,
        snapshot: &'static InputSnapshot,
        writer: GamepadWriter,
    ) -> Self {
        Self {
            gpio,
            snapshot,
            mode: None,
            writer,
        }
    }
}

impl CommunicationBackend for SwitchBackend {
    type Mode = ActiveMode;

    fn snapshot(&self) -> &InputSnapshot {
        self.snapshot
    }

    fn set_mode(&mut self, mode: ActiveMode) {
        self.mode = Some(mode);
    }

    async fn send_report(&mut self) -> Result<(), ReportError> {
        let _ = self.gpio.refresh(self.snapshot).await;
        let frame = self.snapshot.capture();

        let mut out = ControlOutput::neutral();
        if let Some(mode) = self.mode.as_mut() {
            mode.map(frame, &mut out);
        }

        let report = SwitchReport::from(&out);
        self.writer
            .write(&report.as_bytes())
            .await
            .map_err(|_| ReportError::Io)
    }
}
