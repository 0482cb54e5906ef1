//! Nintendo 64 console backend over the Joybus line.

use crossbox_core::{
    CommunicationBackend, ControlOutput, GameMode, InputSnapshot, InputSource, ReportError,
};
use crossbox_modes::ActiveMode;

use crate::gpio_input::GpioButtonInput;
use crate::joybus::JoybusPort;

/// C-stick deflection treated as a C-button press.
const C_THRESHOLD: u8 = 64;

/// Standard N64 poll response.
///
/// Total size: 4 bytes (buttons: 2, stick: 2x1 signed).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct N64Report {
    pub buttons0: u8,
    pub buttons1: u8,
    pub stick_x: i8,
    pub stick_y: i8,
}

impl N64Report {
    /// Size of the report in bytes.
    pub const SIZE: usize = 4;

    /// Convert the report to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        [
            self.buttons0,
            self.buttons1,
            self.stick_x as u8,
            self.stick_y as u8,
        ]
    }
}

impl From<&ControlOutput> for N64Report {
    fn from(out: &ControlOutput) -> Self {
        let mut buttons0 = 0u8;
        for (bit, pressed) in [
            (0, out.dpad_right),
            (1, out.dpad_left),
            (2, out.dpad_down),
            (3, out.dpad_up),
            (4, out.start),
            (5, out.z),
            (6, out.b),
            (7, out.a),
        ] {
            if pressed {
                buttons0 |= 1 << bit;
            }
        }
        let mut buttons1 = 0u8;
        for (bit, pressed) in [
            (0, out.cstick_x > 128 + C_THRESHOLD),
            (1, out.cstick_x < 128 - C_THRESHOLD),
            (2, out.cstick_y < 128 - C_THRESHOLD),
            (3, out.cstick_y > 128 + C_THRESHOLD),
            (4, out.r),
            (5, out.l),
        ] {
            if pressed {
                buttons1 |= 1 << bit;
            }
        }
        Self {
            buttons0,
            buttons1,
            stick_x: out.stick_x.wrapping_sub(128) as i8,
            stick_y: out.stick_y.wrapping_sub(128) as i8,
        }
    }
}

pub struct N64Backend {
    gpio: GpioButtonInput,
    snapshot: &'static InputSnapshot,
    mode: Option<ActiveMode>,
    port: JoybusPort,
}

impl N64Backend {
    #[must_use]
    pub fn new(gpio: GpioButtonInput, snapshot: &'static InputSnapshot, port: JoybusPort) -> Self {
        Self {
            gpio,
            snapshot,
            mode: None,
            port,
        }
    }
}

impl CommunicationBackend for N64Backend {
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

        let report = N64Report::from(&out);
        self.port
            .await_poll()
            .await
            .map_err(|()| ReportError::Dropped)?;
        self.port.transmit(&report.as_bytes());
        Ok(())
    }
}
