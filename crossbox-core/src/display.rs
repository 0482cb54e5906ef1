//! Status display state.
//!
//! Purely presentational: recomputed from the latest captured frame
//! every secondary-loop cycle, never consulted for control decisions.

use heapless::String;

use crate::buttons::{Button, Buttons};

/// Character columns available for the status line (128 px / 6 px font).
pub const STATUS_COLUMNS: usize = 21;

/// Label shown for the active game mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeLabel {
    Melee,
    ProjectM,
    Ultimate,
    Fgc,
    Rivals,
}

impl ModeLabel {
    /// The on-screen text for this label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ModeLabel::Melee => "MELEE",
            ModeLabel::ProjectM => "PM",
            ModeLabel::Ultimate => "ULT",
            ModeLabel::Fgc => "FGC",
            ModeLabel::Rivals => "RoA",
        }
    }

    /// Match the fixed modifier+direction combinations against a frame.
    ///
    /// The combination is Mod X held, Mod Y released, Start held, plus
    /// one selector button; the first selector in this order wins. The
    /// active mode is not readable from the backend, so the display
    /// infers it from the same combinations the mode switcher uses.
    #[must_use]
    pub fn from_combo(frame: Buttons) -> Option<Self> {
        if !frame.contains(Button::ModX)
            || frame.contains(Button::ModY)
            || !frame.contains(Button::Start)
        {
            return None;
        }
        if frame.contains(Button::L) {
            Some(ModeLabel::Melee)
        } else if frame.contains(Button::Left) {
            Some(ModeLabel::ProjectM)
        } else if frame.contains(Button::Down) {
            Some(ModeLabel::Ultimate)
        } else if frame.contains(Button::Right) {
            Some(ModeLabel::Fgc)
        } else if frame.contains(Button::B) {
            Some(ModeLabel::Rivals)
        } else {
            None
        }
    }
}

/// Derived display state: backend label plus the latched mode label.
///
/// The backend label is fixed at bootstrap; the mode label starts from
/// the bootstrap default and is re-latched whenever a mode-switch
/// combination shows up in the frame. No match leaves it unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    pub backend_label: &'static str,
    pub mode: Option<ModeLabel>,
}

impl DisplayState {
    /// Placeholder state shown until bootstrap fills the labels in.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            backend_label: "BACKEND",
            mode: None,
        }
    }

    /// Latch the mode label from the current frame, if a combination
    /// matches.
    pub fn update(&mut self, frame: Buttons) {
        if let Some(label) = ModeLabel::from_combo(frame) {
            self.mode = Some(label);
        }
    }

    /// Compose the status line: backend label left, mode label
    /// right-aligned.
    #[must_use]
    pub fn status_line(&self) -> String<STATUS_COLUMNS> {
        let mode = self.mode.map_or("MODE", ModeLabel::as_str);
        let mut line = String::new();
        let _ = line.push_str(self.backend_label);
        let pad = STATUS_COLUMNS
            .saturating_sub(self.backend_label.len())
            .saturating_sub(mode.len());
        for _ in 0..pad {
            let _ = line.push(' ');
        }
        let _ = line.push_str(mode);
        line
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combo() -> Buttons {
        Buttons::NONE.with(Button::ModX).with(Button::Start)
    }

    #[test]
    fn test_combo_selectors() {
        assert_eq!(
            ModeLabel::from_combo(combo().with(Button::L)),
            Some(ModeLabel::Melee)
        );
        assert_eq!(
            ModeLabel::from_combo(combo().with(Button::Left)),
            Some(ModeLabel::ProjectM)
        );
        assert_eq!(
            ModeLabel::from_combo(combo().with(Button::Down)),
            Some(ModeLabel::Ultimate)
        );
        assert_eq!(
            ModeLabel::from_combo(combo().with(Button::Right)),
            Some(ModeLabel::Fgc)
        );
        assert_eq!(
            ModeLabel::from_combo(combo().with(Button::B)),
            Some(ModeLabel::Rivals)
        );
    }

    #[test]
    fn test_combo_requires_mod_x_without_mod_y() {
        assert_eq!(ModeLabel::from_combo(combo()), None);
        assert_eq!(
            ModeLabel::from_combo(combo().with(Button::L).with(Button::ModY)),
            None
        );
        assert_eq!(
            ModeLabel::from_combo(
                Buttons::NONE.with(Button::Start).with(Button::L)
            ),
            None
        );
    }

    #[test]
    fn test_first_selector_wins() {
        // L outranks Left.
        assert_eq!(
            ModeLabel::from_combo(combo().with(Button::L).with(Button::Left)),
            Some(ModeLabel::Melee)
        );
    }

    #[test]
    fn test_latch_keeps_previous_label_without_match() {
        let mut state = DisplayState::new();
        state.update(combo().with(Button::Down));
        assert_eq!(state.mode, Some(ModeLabel::Ultimate));

        // No combination in the frame: label unchanged.
        state.update(Buttons::NONE.with(Button::A));
        assert_eq!(state.mode, Some(ModeLabel::Ultimate));

        state.update(combo().with(Button::Right));
        assert_eq!(state.mode, Some(ModeLabel::Fgc));
    }

    #[test]
    fn test_status_line_layout() {
        let state = DisplayState {
            backend_label: "XINPUT",
            mode: Some(ModeLabel::Melee),
        };
        let line = state.status_line();
        assert_eq!(line.len(), STATUS_COLUMNS);
        assert!(line.starts_with("XINPUT"));
        assert!(line.ends_with("MELEE"));
    }

    #[test]
    fn test_status_line_placeholders() {
        let line = DisplayState::new().status_line();
        assert!(line.starts_with("BACKEND"));
        assert!(line.ends_with("MODE"));
    }
}
