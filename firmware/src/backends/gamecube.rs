//! GameCube console backend over the Joybus line.

use crossbox_core::{
    CommunicationBackend, ControlOutput, GameMode, InputSnapshot, InputSource, ReportError,
};
use crossbox_modes::ActiveMode;

use crate::gpio_input::GpioButtonInput;
use crate::joybus::JoybusPort;

/// Standard GameCube poll response.
///
/// Total size: 8 bytes (buttons: 2, sticks: 4x1, triggers: 2x1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GcReport {
    pub buttons0: u8,
    pub buttons1: u8,
    pub stick_x: u8,
    pub stick_y: u8,
    pub cstick_x: u8,
    pub cstick_y: u8,
    pub trigger_l: u8,
    pub trigger_r: u8,
}

impl GcReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 8;

    /// Convert the report to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        [
            self.buttons0,
            self.buttons1,
            self.stick_x,
            self.stick_y,
            self.cstick_x,
            self.cstick_y,
            self.trigger_l,
            self.trigger_r,
        ]
    }
}

impl From<&ControlOutput> for GcReport {
    fn from(out: &ControlOutput) -> Self {
        let mut buttons0 = 0u8;
        for (bit, pressed) in [
            (0, out.a),
            (1, out.b),
            (2, out.x),
            (3, out.y),
            (4, out.start),
        ] {
            if pressed {
                buttons0 |= 1 << bit;
            }
        }
        // Bit 7 of the second byte is always set on the wire.
        let mut buttons1 = 0x80u8;
        for (bit, pressed) in [
            (0, out.dpad_left),
            (1, out.dpad_right),
            (2, out.dpad_down),
            (3, out.dpad_up),
            (4, out.z),
            (5, out.r),
            (6, out.l),
        ] {
            if pressed {
                buttons1 |= 1 << bit;
            }
        }
        Self {
            buttons0,
            buttons1,
            stick_x: out.stick_x,
            stick_y: out.stick_y,
            cstick_x: out.cstick_x,
            cstick_y: out.cstick_y,
            trigger_l: if out.l { 255 } else { out.trigger_l },
            trigger_r: if out.r { 255 } else { out.trigger_r },
        }
    }
}

pub struct GamecubeBackend {
    gpio: GpioButtonInput,
    snapshot: &'static InputSnapshot,
    mode: Option<ActiveMode>,
    port: JoybusPort,
}

impl GamecubeBackend {
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

impl CommunicationBackend for GamecubeBackend {
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

        let report = GcReport::from(&out);
        // Answer the console's next poll; a missed poll drops this
        // report rather than answering late.
        self.port
            .await_poll()
            .await
            .map_err(|()| ReportError::Dropped)?;
        self.port.transmit(&report.as_bytes());
        Ok(())
    }
}
