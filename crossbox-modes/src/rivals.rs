//! Rivals of Aether mode.

use crossbox_core::{Button, Buttons, ControlOutput, GameMode};

use crate::analog::axis;
use crate::socd::{SocdMode, SocdPair};

const FULL: u8 = 80;
const MOD_X_TILT: u8 = 53;
const MOD_Y_TILT: u8 = 34;

pub struct Rivals {
    horizontal: SocdPair,
    vertical: SocdPair,
}

impl Rivals {
    #[must_use]
    pub fn new(socd: SocdMode) -> Self {
        Self {
            horizontal: SocdPair::new(socd),
            vertical: SocdPair::new(socd),
        }
    }
}

impl GameMode for Rivals {
    fn map(&mut self, frame: Buttons, out: &mut ControlOutput) {
        *out = ControlOutput::neutral();
        out.a = frame.contains(Button::A);
        out.b = frame.contains(Button::B);
        out.x = frame.contains(Button::X);
        out.y = frame.contains(Button::Y);
        out.z = frame.contains(Button::Z);
        out.l = frame.contains(Button::L);
        out.r = frame.contains(Button::R);
        out.start = frame.contains(Button::Start);
        out.select = frame.contains(Button::Select);
        out.home = frame.contains(Button::Home);

        let (left, right) = self
            .horizontal
            .resolve(frame.contains(Button::Left), frame.contains(Button::Right));
        let (down, up) = self
            .vertical
            .resolve(frame.contains(Button::Down), frame.contains(Button::Up));

        let magnitude = if frame.contains(Button::ModX) {
            MOD_X_TILT
        } else if frame.contains(Button::ModY) {
            MOD_Y_TILT
        } else {
            FULL
        };
        out.stick_x = axis(left, right, magnitude);
        out.stick_y = axis(down, up, magnitude);

        out.cstick_x = axis(
            frame.contains(Button::CLeft),
            frame.contains(Button::CRight),
            FULL,
        );
        out.cstick_y = axis(
            frame.contains(Button::CDown),
            frame.contains(Button::CUp),
            FULL,
        );
    }
}
