//! The live, cross-core button state record.

use portable_atomic::{AtomicBool, Ordering};

use crate::buttons::{Button, Buttons};

/// Live button state shared between both execution contexts.
///
/// One relaxed atomic flag per button. Each flag is only ever written
/// with its latest physical reading (a plain store, never a
/// read-modify-write), so concurrent access from both cores is a benign
/// race: a reader may observe a mix of old and new flags, which is
/// acceptable for report building and cosmetic rendering alike. Do not
/// put a lock in front of this type; the report loop's timing budget
/// does not allow one.
///
/// Exactly one instance lives for the process lifetime. Input sources
/// mutate it in place; it is never reconstructed mid-session.
pub struct InputSnapshot {
    flags: [AtomicBool; Button::COUNT],
}

impl InputSnapshot {
    /// Create a snapshot with all buttons released.
    #[must_use]
    pub const fn new() -> Self {
        const RELEASED: AtomicBool = AtomicBool::new(false);
        Self {
            flags: [RELEASED; Button::COUNT],
        }
    }

    /// Read one button's latest state.
    #[inline]
    #[must_use]
    pub fn get(&self, button: Button) -> bool {
        self.flags[button.index()].load(Ordering::Relaxed)
    }

    /// Store one button's latest physical reading.
    #[inline]
    pub fn set(&self, button: Button, pressed: bool) {
        self.flags[button.index()].store(pressed, Ordering::Relaxed);
    }

    /// Capture the current state as an immutable frame.
    ///
    /// The capture is not atomic across buttons; flags written
    /// concurrently by the other core may tear relative to each other.
    #[must_use]
    pub fn capture(&self) -> Buttons {
        let mut frame = Buttons::NONE;
        for button in Button::ALL {
            frame.set(button, self.get(button));
        }
        frame
    }
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_released() {
        let snapshot = InputSnapshot::new();
        assert!(snapshot.capture().is_empty());
    }

    #[test]
    fn test_set_get_roundtrip() {
        let snapshot = InputSnapshot::new();
        snapshot.set(Button::A, true);
        snapshot.set(Button::ModX, true);
        assert!(snapshot.get(Button::A));
        assert!(snapshot.get(Button::ModX));
        assert!(!snapshot.get(Button::B));

        snapshot.set(Button::A, false);
        assert!(!snapshot.get(Button::A));
    }

    #[test]
    fn test_capture_matches_flags() {
        let snapshot = InputSnapshot::new();
        snapshot.set(Button::Start, true);
        snapshot.set(Button::CDown, true);

        let frame = snapshot.capture();
        assert!(frame.contains(Button::Start));
        assert!(frame.contains(Button::CDown));
        assert!(!frame.contains(Button::Home));
    }
}
