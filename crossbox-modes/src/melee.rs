//! Melee mode: tilt modifiers, analog shields, crouch-walk option.

use crossbox_core::{Button, Buttons, ControlOutput, GameMode};

use crate::analog::axis;
use crate::socd::{SocdMode, SocdPair};

const FULL: u8 = 80;
const MOD_X_TILT: u8 = 53;
const MOD_Y_TILT: u8 = 27;
const CROUCH_WALK_Y: u8 = 49;
const LIGHTSHIELD: u8 = 49;
const MIDSHIELD: u8 = 94;

/// Tunables for [`Melee`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeleeOptions {
    /// Keep the stick below the walk threshold while crouching
    /// laterally.
    pub crouch_walk_os: bool,
}

pub struct Melee {
    options: MeleeOptions,
    horizontal: SocdPair,
    vertical: SocdPair,
}

impl Melee {
    #[must_use]
    pub fn new(socd: SocdMode, options: MeleeOptions) -> Self {
        Self {
            options,
            horizontal: SocdPair::new(socd),
            vertical: SocdPair::new(socd),
        }
    }
}

impl GameMode for Melee {
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

        let y_magnitude = if self.options.crouch_walk_os && down && (left || right) {
            CROUCH_WALK_Y
        } else {
            magnitude
        };
        out.stick_y = axis(down, up, y_magnitude);

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

        if frame.contains(Button::LightShield) {
            out.trigger_r = LIGHTSHIELD;
        } else if frame.contains(Button::MidShield) {
            out.trigger_r = MIDSHIELD;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(mode: &mut Melee, frame: Buttons) -> ControlOutput {
        let mut out = ControlOutput::neutral();
        mode.map(frame, &mut out);
        out
    }

    #[test]
    fn test_cardinals_and_buttons() {
        let mut mode = Melee::new(SocdMode::SecondInputNoReactivation, MeleeOptions::default());
        let out = map(
            &mut mode,
            Buttons::NONE.with(Button::A).with(Button::Right),
        );
        assert!(out.a);
        assert_eq!(out.stick_x, 128 + 80);
        assert_eq!(out.stick_y, 128);
    }

    #[test]
    fn test_mod_x_tilts_the_stick() {
        let mut mode = Melee::new(SocdMode::SecondInputNoReactivation, MeleeOptions::default());
        let out = map(
            &mut mode,
            Buttons::NONE.with(Button::Left).with(Button::ModX),
        );
        assert_eq!(out.stick_x, 128 - 53);
    }

    #[test]
    fn test_opposing_cardinals_resolve() {
        let mut mode = Melee::new(SocdMode::SecondInputNoReactivation, MeleeOptions::default());
        let _ = map(&mut mode, Buttons::NONE.with(Button::Left));
        let out = map(
            &mut mode,
            Buttons::NONE.with(Button::Left).with(Button::Right),
        );
        // Right pressed second wins.
        assert_eq!(out.stick_x, 128 + 80);
    }

    #[test]
    fn test_crouch_walk_option() {
        let mut mode = Melee::new(
            SocdMode::SecondInputNoReactivation,
            MeleeOptions {
                crouch_walk_os: true,
            },
        );
        let out = map(
            &mut mode,
            Buttons::NONE.with(Button::Down).with(Button::Right),
        );
        assert_eq!(out.stick_y, 128 - 49);
        assert_eq!(out.stick_x, 128 + 80);
    }

    #[test]
    fn test_shield_levels() {
        let mut mode = Melee::new(SocdMode::SecondInputNoReactivation, MeleeOptions::default());
        let out = map(&mut mode, Buttons::NONE.with(Button::LightShield));
        assert_eq!(out.trigger_r, 49);
        let out = map(&mut mode, Buttons::NONE.with(Button::MidShield));
        assert_eq!(out.trigger_r, 94);
    }
}
