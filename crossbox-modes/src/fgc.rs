//! Fighting-game mode: directions on the d-pad, six attack buttons.

use crossbox_core::{Button, Buttons, ControlOutput, GameMode};

use crate::socd::{SocdMode, SocdPair};

pub struct Fgc {
    horizontal: SocdPair,
}

impl Fgc {
    /// FGC rules want neutral on opposing lateral inputs; up wins over
    /// down for jump priority.
    #[must_use]
    pub fn new() -> Self {
        Self {
            horizontal: SocdPair::new(SocdMode::Neutral),
        }
    }
}

impl Default for Fgc {
    fn default() -> Self {
        Self::new()
    }
}

impl GameMode for Fgc {
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
        let up = frame.contains(Button::Up);
        out.dpad_left = left;
        out.dpad_right = right;
        out.dpad_up = up;
        out.dpad_down = frame.contains(Button::Down) && !up;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions_go_to_dpad() {
        let mut mode = Fgc::new();
        let mut out = ControlOutput::neutral();
        mode.map(Buttons::NONE.with(Button::Left), &mut out);
        assert!(out.dpad_left);
        assert_eq!(out.stick_x, 128);
    }

    #[test]
    fn test_left_right_neutral_and_up_priority() {
        let mut mode = Fgc::new();
        let mut out = ControlOutput::neutral();
        mode.map(
            Buttons::NONE
                .with(Button::Left)
                .with(Button::Right)
                .with(Button::Up)
                .with(Button::Down),
            &mut out,
        );
        assert!(!out.dpad_left && !out.dpad_right);
        assert!(out.dpad_up);
        assert!(!out.dpad_down);
    }
}
