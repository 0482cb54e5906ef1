//! Input-processing modes for the crossbox controller firmware.
//!
//! Each mode maps a captured button frame to a processed
//! [`ControlOutput`]; backends serialize that output to their own wire
//! format. Modes are selected once at bootstrap and may be replaced at
//! runtime by the mode switcher.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

mod analog;
pub mod fgc;
pub mod keyboard;
pub mod melee;
pub mod project_m;
pub mod rivals;
pub mod socd;
pub mod ultimate;

pub use fgc::Fgc;
pub use melee::{Melee, MeleeOptions};
pub use project_m::ProjectM;
pub use rivals::Rivals;
pub use socd::{SocdMode, SocdPair};
pub use ultimate::Ultimate;

use crossbox_core::{Buttons, ControlOutput, GameMode};

/// The game mode currently attached to a backend.
///
/// Backends store modes by value; this tagged variant is how one slot
/// holds any of them.
pub enum ActiveMode {
    Melee(Melee),
    ProjectM(ProjectM),
    Ultimate(Ultimate),
    Fgc(Fgc),
    Rivals(Rivals),
}

impl ActiveMode {
    /// The boot-time default: Melee with second-input SOCD (no
    /// reactivation) and the crouch-walk option off.
    #[must_use]
    pub fn default_melee() -> Self {
        ActiveMode::Melee(Melee::new(
            SocdMode::SecondInputNoReactivation,
            MeleeOptions::default(),
        ))
    }

    /// The Switch-backend default: Ultimate with second-input SOCD.
    #[must_use]
    pub fn default_ultimate() -> Self {
        ActiveMode::Ultimate(Ultimate::new(SocdMode::SecondInput))
    }
}

impl GameMode for ActiveMode {
    fn map(&mut self, frame: Buttons, out: &mut ControlOutput) {
        match self {
            ActiveMode::Melee(mode) => mode.map(frame, out),
            ActiveMode::ProjectM(mode) => mode.map(frame, out),
            ActiveMode::Ultimate(mode) => mode.map(frame, out),
            ActiveMode::Fgc(mode) => mode.map(frame, out),
            ActiveMode::Rivals(mode) => mode.map(frame, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbox_core::Button;

    #[test]
    fn test_active_mode_delegates() {
        let mut mode = ActiveMode::default_melee();
        let mut out = ControlOutput::neutral();
        mode.map(Buttons::NONE.with(Button::Left), &mut out);
        assert_eq!(out.stick_x, 128 - 80);

        let mut mode = ActiveMode::default_ultimate();
        mode.map(Buttons::NONE.with(Button::Left), &mut out);
        assert_eq!(out.stick_x, 128 - 100);
    }
}
