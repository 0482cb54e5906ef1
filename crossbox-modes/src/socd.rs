//! Simultaneous-opposing-cardinal-direction cleaning.

/// How an opposing direction pair is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SocdMode {
    /// Both held resolves to neutral.
    Neutral,
    /// The most recent press wins; releasing it reactivates the other.
    SecondInput,
    /// The most recent press wins; the overridden direction stays
    /// suppressed until released and pressed again.
    SecondInputNoReactivation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Winner {
    None,
    A,
    B,
}

/// Stateful resolver for one opposing direction pair.
#[derive(Clone, Copy, Debug)]
pub struct SocdPair {
    mode: SocdMode,
    prev_a: bool,
    prev_b: bool,
    winner: Winner,
}

impl SocdPair {
    #[must_use]
    pub const fn new(mode: SocdMode) -> Self {
        Self {
            mode,
            prev_a: false,
            prev_b: false,
            winner: Winner::None,
        }
    }

    /// Resolve the raw pair into the cleaned pair.
    ///
    /// Call once per captured frame; the pair tracks press order across
    /// calls.
    pub fn resolve(&mut self, a: bool, b: bool) -> (bool, bool) {
        let pressed_a = a && !self.prev_a;
        let pressed_b = b && !self.prev_b;
        self.prev_a = a;
        self.prev_b = b;

        if self.mode == SocdMode::Neutral {
            return if a && b { (false, false) } else { (a, b) };
        }

        if a && b {
            if pressed_b {
                self.winner = Winner::B;
            } else if pressed_a {
                self.winner = Winner::A;
            } else if self.winner == Winner::None {
                self.winner = Winner::A;
            }
        } else if a {
            if pressed_a || self.mode == SocdMode::SecondInput {
                self.winner = Winner::A;
            } else if self.winner == Winner::B {
                // No reactivation: must be released and pressed again.
                self.winner = Winner::None;
            }
        } else if b {
            if pressed_b || self.mode == SocdMode::SecondInput {
                self.winner = Winner::B;
            } else if self.winner == Winner::A {
                self.winner = Winner::None;
            }
        } else {
            self.winner = Winner::None;
        }

        match self.winner {
            Winner::A => (true, false),
            Winner::B => (false, true),
            Winner::None => (false, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_cancels_both() {
        let mut pair = SocdPair::new(SocdMode::Neutral);
        assert_eq!(pair.resolve(true, false), (true, false));
        assert_eq!(pair.resolve(true, true), (false, false));
        assert_eq!(pair.resolve(false, true), (false, true));
    }

    #[test]
    fn test_second_input_most_recent_wins() {
        let mut pair = SocdPair::new(SocdMode::SecondInput);
        assert_eq!(pair.resolve(true, false), (true, false));
        // B pressed while A held: B wins.
        assert_eq!(pair.resolve(true, true), (false, true));
        // B released: A reactivates.
        assert_eq!(pair.resolve(true, false), (true, false));
    }

    #[test]
    fn test_no_reactivation_suppresses_the_overridden_side() {
        let mut pair = SocdPair::new(SocdMode::SecondInputNoReactivation);
        assert_eq!(pair.resolve(true, false), (true, false));
        assert_eq!(pair.resolve(true, true), (false, true));
        // B released while A still held: A stays suppressed.
        assert_eq!(pair.resolve(true, false), (false, false));
        // A released and pressed again: active again.
        assert_eq!(pair.resolve(false, false), (false, false));
        assert_eq!(pair.resolve(true, false), (true, false));
    }

    #[test]
    fn test_override_in_both_orders() {
        let mut pair = SocdPair::new(SocdMode::SecondInput);
        assert_eq!(pair.resolve(false, true), (false, true));
        assert_eq!(pair.resolve(true, true), (true, false));
        assert_eq!(pair.resolve(false, true), (false, true));
    }
}
