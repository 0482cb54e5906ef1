//! XInput-style USB backend, the default when no console is detected.

use crossbox_core::{
    CommunicationBackend, ControlOutput, GameMode, InputSnapshot, InputSource, ReportError,
};
use crossbox_modes::ActiveMode;

use crate::gpio_input::GpioButtonInput;
use crate::usb::GamepadWriter;

/// Wire report matching [`crate::usb::XINPUT_DESCRIPTOR`].
///
/// Total size: 12 bytes (buttons: 2, sticks: 4x2, triggers: 2x1).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct XInputReport {
    pub buttons: u16,
    pub stick_x: i16,
    pub stick_y: i16,
    pub cstick_x: i16,
    pub cstick_y: i16,
    pub trigger_l: u8,
    pub trigger_r: u8,
}

impl XInputReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 12;

    /// Convert the report to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let b = self.buttons.to_le_bytes();
        let sx = self.stick_x.to_le_bytes();
        let sy = self.stick_y.to_le_bytes();
        let cx = self.cstick_x.to_le_bytes();
        let cy = self.cstick_y.to_le_bytes();
        [
            b[0], b[1], sx[0], sx[1], sy[0], sy[1], cx[0], cx[1], cy[0], cy[1], self.trigger_l,
            self.trigger_r,
        ]
    }
}

/// Scale an 8-bit 128-centered axis to the full signed 16-bit range.
#[inline]
fn wide_axis(value: u8) -> i16 {
    (i16::from(value) - 128) << 8
}

impl From<&ControlOutput> for XInputReport {
    fn from(out: &ControlOutput) -> Self {
        let mut buttons = 0u16;
        for (bit, pressed) in [
            (0, out.a),
            (1, out.b),
            (2, out.x),
            (3, out.y),
            (5, out.z), // right bumper
            (6, out.select),
            (7, out.start),
            (8, out.home), // guide
            (11, out.dpad_up),
            (12, out.dpad_down),
            (13, out.dpad_left),
            (14, out.dpad_right),
        ] {
            if pressed {
                buttons |= 1 << bit;
            }
        }
        Self {
            buttons,
            stick_x: wide_axis(out.stick_x),
            stick_y: wide_axis(out.stick_y),
            cstick_x: wide_axis(out.cstick_x),
            cstick_y: wide_axis(out.cstick_y),
            // Digital shoulder presses saturate the analog slots.
            trigger_l: if out.l { 255 } else { out.trigger_l },
            trigger_r: if out.r { 255 } else { out.trigger_r },
        }
    }
}

pub struct XInputBackend {
    gpio: GpioButtonInput,
    snapshot: &'static InputSnapshot,
    mode: Option<ActiveMode>,
    writer: GamepadWriter,
}

impl XInputBackend {
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

impl CommunicationBackend for XInputBackend {
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

        let report = XInputReport::from(&out);
        self.writer
            .write(&report.as_bytes())
            .await
            .map_err(|_| ReportError::Io)
    }
}
