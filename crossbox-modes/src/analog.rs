//! Shared stick coordinate helpers.

use crossbox_core::STICK_NEUTRAL;

/// Compute one axis value from a cleaned direction pair.
#[inline]
#[must_use]
pub(crate) fn axis(negative: bool, positive: bool, magnitude: u8) -> u8 {
    match (negative, positive) {
        (true, false) => STICK_NEUTRAL - magnitude,
        (false, true) => STICK_NEUTRAL + magnitude,
        _ => STICK_NEUTRAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_directions() {
        assert_eq!(axis(false, false, 80), 128);
        assert_eq!(axis(true, false, 80), 48);
        assert_eq!(axis(false, true, 80), 208);
        assert_eq!(axis(true, true, 80), 128);
    }
}
