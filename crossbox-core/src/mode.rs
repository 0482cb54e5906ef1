//! Input-processing policy traits and the processed output record.

use core::future::Future;

use crate::backend::ReportError;
use crate::buttons::Buttons;

/// Stick axis value at rest.
pub const STICK_NEUTRAL: u8 = 128;

/// The processed controller output a game mode produces.
///
/// Backends serialize this into their own wire format; modes fill it in
/// from a captured button frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlOutput {
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub z: bool,
    pub l: bool,
    pub r: bool,
    pub start: bool,
    pub select: bool,
    pub home: bool,
    pub dpad_up: bool,
    pub dpad_down: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
    pub stick_x: u8,
    pub stick_y: u8,
    pub cstick_x: u8,
    pub cstick_y: u8,
    pub trigger_l: u8,
    pub trigger_r: u8,
}

impl ControlOutput {
    /// All buttons released, sticks centered, triggers at zero.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            a: false,
            b: false,
            x: false,
            y: false,
            z: false,
            l: false,
            r: false,
            start: false,
            select: false,
            home: false,
            dpad_up: false,
            dpad_down: false,
            dpad_left: false,
            dpad_right: false,
            stick_x: STICK_NEUTRAL,
            stick_y: STICK_NEUTRAL,
            cstick_x: STICK_NEUTRAL,
            cstick_y: STICK_NEUTRAL,
            trigger_l: 0,
            trigger_r: 0,
        }
    }
}

impl Default for ControlOutput {
    fn default() -> Self {
        Self::neutral()
    }
}

/// An input-processing policy attached to a backend.
///
/// `map` is called once per report with the latest captured frame.
/// Implementations may keep state across calls (SOCD resolution does).
pub trait GameMode {
    /// Map a captured frame to a processed output.
    fn map(&mut self, frame: Buttons, out: &mut ControlOutput);
}

/// A keyboard-emulation policy with its own report path.
///
/// When attached, the report loop asks it for one extra report per
/// cycle, built from the primary backend's snapshot.
pub trait KeyboardMode {
    /// Send one keyboard report for the given frame.
    fn send_report(&mut self, frame: Buttons) -> impl Future<Output = Result<(), ReportError>>;
}

/// The mode-switch evaluator run at the top of every report cycle.
///
/// May replace the primary backend's game mode and may attach or detach
/// the keyboard mode as side effects; this core treats both as opaque
/// capability calls.
pub trait ModeSwitch<B, K> {
    fn evaluate(&mut self, primary: &mut B, keyboard: &mut Option<K>);
}
