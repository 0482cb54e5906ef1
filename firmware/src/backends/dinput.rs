//! DInput USB backend, forced by holding Z at plug-in.
//!
//! This is the path that also registers the USB keyboard interface;
//! the keyboard-emulation mode itself lives in [`crate::usb`].

use crossbox_core::{
    CommunicationBackend, ControlOutput, GameMode, InputSnapshot, InputSource, ReportError,
};
use crossbox_modes::ActiveMode;

use crate::gpio_input::GpioButtonInput;
use crate::usb::GamepadWriter;

/// Wire report matching [`crate::usb::DINPUT_DESCRIPTOR`].
///
/// Total size: 8 bytes (buttons: 2, sticks: 4x1, triggers: 2x1).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct DInputReport {
    pub buttons: u16,
    pub stick_x: i8,
    pub stick_y: i8,
    pub cstick_x: i8,
    pub cstick_y: i8,
    pub trigger_l: u8,
    pub trigger_r: u8,
}

impl DInputReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 8;

    /// Convert the report to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let b = self.buttons.to_le_bytes();
        [
            b[0],
            b[1],
            self.stick_x as u8,
            self.stick_y as u8,
            self.cstick_x as u8,
            self.cstick_y as u8,
            self.trigger_l,
            self.trigger_r,
        ]
    }
}

/// Center an 8-bit 128-centered axis around zero.
#[inline]
fn narrow_axis(value: u8) -> i8 {
    value.wrapping_sub(128) as i8
}

impl From<&ControlOutput> for DInputReport {
    fn from(out: &ControlOutput) -> Self {
        let mut buttons = 0u16;
        for (bit, pressed) in [
            (0, out.a),
            (1, out.b),
            (2, out.x),
            (3, out.y),
            (4, out.z),
            (5, out.l),
            (6, out.r),
            (7, out.start),
            (8, out.select),
            (9, out.home),
            (12, out.dpad_up),
            (13, out.dpad_down),
            (14, out.dpad_left),
            (15, out.dpad_right),
        ] {
            if pressed {
                buttons |= 1 << bit;
            }
        }
        Self {
            buttons,
            stick_x: narrow_axis(out.stick_x),
            stick_y: narrow_axis(out.stick_y),
            cstick_x: narrow_axis(out.cstick_x),
            cstick_y: narrow_axis(out.cstick_y),
            trigger_l: out.trigger_l,
            trigger_r: out.trigger_r,
        }
    }
}

pub struct DInputBackend {
    gpio: GpioButtonInput,
    snapshot: &'static InputSnapshot,
    mode: Option<ActiveMode>,
    writer: GamepadWriter,
}

impl DInputBackend {
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

impl CommunicationBackend for DInputBackend {
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

        let report = DInputReport::from(&out);
        self.writer
            .write(&report.as_bytes())
            .await
            .map_err(|_| ReportError::Io)
    }
}
