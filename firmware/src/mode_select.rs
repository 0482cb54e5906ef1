//! Runtime mode switching.
//!
//! Evaluated at the top of every report cycle against the primary
//! backend's snapshot. Game modes are selected with Mod X + Start plus
//! a selector button (the same combinations the status display
//! matches); the keyboard mode attaches on Mod Y + Start + Z and
//! detaches when any game mode is selected.

use crossbox_core::{Button, Buttons, CommunicationBackend, ModeSwitch};
use crossbox_modes::{ActiveMode, Fgc, ProjectM, Rivals, SocdMode};

use crate::backends::Backend;
use crate::usb::UsbKeyboard;

pub struct ModeSelector {
    /// Keyboard report path, parked here while a game mode is active.
    /// Only the DInput path has one.
    parked_keyboard: Option<UsbKeyboard>,
}

impl ModeSelector {
    #[must_use]
    pub fn new(keyboard: Option<UsbKeyboard>) -> Self {
        Self {
            parked_keyboard: keyboard,
        }
    }
}

fn selected_mode(frame: Buttons) -> Option<ActiveMode> {
    if frame.contains(Button::L) {
        Some(ActiveMode::default_melee())
    } else if frame.contains(Button::Left) {
        Some(ActiveMode::ProjectM(ProjectM::new(
            SocdMode::SecondInputNoReactivation,
        )))
    } else if frame.contains(Button::Down) {
        Some(ActiveMode::default_ultimate())
    } else if frame.contains(Button::Right) {
        Some(ActiveMode::Fgc(Fgc::new()))
    } else if frame.contains(Button::B) {
        Some(ActiveMode::Rivals(Rivals::new(SocdMode::SecondInput)))
    } else {
        None
    }
}

impl ModeSwitch<Backend, UsbKeyboard> for ModeSelector {
    fn evaluate(&mut self, primary: &mut Backend, keyboard: &mut Option<UsbKeyboard>) {
        let frame = primary.snapshot().capture();
        let start = frame.contains(Button::Start);
        let mod_x = frame.contains(Button::ModX);
        let mod_y = frame.contains(Button::ModY);

        if mod_x && !mod_y && start {
            if let Some(mode) = selected_mode(frame) {
                primary.set_mode(mode);
                // A game mode displaces the keyboard.
                if let Some(kb) = keyboard.take() {
                    self.parked_keyboard = Some(kb);
                }
            }
        } else if mod_y && !mod_x && start && frame.contains(Button::Z) && keyboard.is_none() {
            *keyboard = self.parked_keyboard.take();
        }
    }
}
