//! Per-button indicator layouts for the status display.
//!
//! Configuration data, not logic: each screen region has a handful of
//! named arrangements, and the firmware's config picks one per region
//! by name. Coordinates are in display pixels for a 128x64 surface.

use crate::buttons::Button;

/// One indicator circle: which button it reflects and where it sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Indicator {
    pub button: Button,
    pub x: u8,
    pub y: u8,
    pub radius: u8,
}

const fn dot(button: Button, x: u8, y: u8) -> Indicator {
    Indicator {
        button,
        x,
        y,
        radius: 4,
    }
}

/// A screen region with its own arrangement choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Region {
    LeftHand,
    Thumbs,
    RightHand,
}

const LEFT_HAND_B0XX: [Indicator; 4] = [
    dot(Button::L, 6, 29),
    dot(Button::Left, 15, 23),
    dot(Button::Down, 25, 22),
    dot(Button::Right, 35, 27),
];

const LEFT_HAND_ROW: [Indicator; 4] = [
    dot(Button::L, 4, 26),
    dot(Button::Left, 14, 26),
    dot(Button::Down, 24, 26),
    dot(Button::Right, 34, 26),
];

const THUMBS_B0XX: [Indicator; 3] = [
    dot(Button::ModX, 38, 51),
    dot(Button::ModY, 46, 57),
    dot(Button::Start, 64, 27),
];

const THUMBS_ROW: [Indicator; 3] = [
    dot(Button::ModX, 44, 56),
    dot(Button::ModY, 54, 56),
    dot(Button::Start, 64, 26),
];

const RIGHT_HAND_B0XX: [Indicator; 13] = [
    dot(Button::CLeft, 82, 46),
    dot(Button::CDown, 82, 57),
    dot(Button::CUp, 90, 40),
    dot(Button::A, 90, 52),
    dot(Button::CRight, 99, 46),
    dot(Button::R, 93, 17),
    dot(Button::B, 93, 27),
    dot(Button::Y, 103, 13),
    dot(Button::X, 102, 23),
    dot(Button::LightShield, 113, 14),
    dot(Button::Z, 112, 24),
    dot(Button::MidShield, 122, 19),
    dot(Button::Up, 122, 29),
];

const RIGHT_HAND_ROW: [Indicator; 13] = [
    dot(Button::R, 74, 16),
    dot(Button::B, 84, 16),
    dot(Button::Y, 94, 16),
    dot(Button::X, 104, 16),
    dot(Button::Z, 114, 16),
    dot(Button::LightShield, 104, 26),
    dot(Button::MidShield, 114, 26),
    dot(Button::Up, 122, 21),
    dot(Button::CUp, 90, 40),
    dot(Button::CLeft, 82, 48),
    dot(Button::CDown, 90, 56),
    dot(Button::CRight, 98, 48),
    dot(Button::A, 90, 48),
];

/// Look up a named arrangement for a region.
///
/// Returns `None` for an unknown name; callers fall back to `"b0xx"`.
#[must_use]
pub fn arrangement(region: Region, name: &str) -> Option<&'static [Indicator]> {
    match (region, name) {
        (Region::LeftHand, "b0xx") => Some(&LEFT_HAND_B0XX),
        (Region::LeftHand, "row") => Some(&LEFT_HAND_ROW),
        (Region::Thumbs, "b0xx") => Some(&THUMBS_B0XX),
        (Region::Thumbs, "row") => Some(&THUMBS_ROW),
        (Region::RightHand, "b0xx") => Some(&RIGHT_HAND_B0XX),
        (Region::RightHand, "row") => Some(&RIGHT_HAND_ROW),
        _ => None,
    }
}

/// The default arrangement for a region.
#[must_use]
pub fn default_arrangement(region: Region) -> &'static [Indicator] {
    match region {
        Region::LeftHand => &LEFT_HAND_B0XX,
        Region::Thumbs => &THUMBS_B0XX,
        Region::RightHand => &RIGHT_HAND_B0XX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_resolve() {
        for region in [Region::LeftHand, Region::Thumbs, Region::RightHand] {
            assert!(arrangement(region, "b0xx").is_some());
            assert!(arrangement(region, "row").is_some());
            assert!(arrangement(region, "nope").is_none());
        }
    }

    #[test]
    fn test_regions_cover_disjoint_buttons() {
        let mut seen = 0u32;
        for region in [Region::LeftHand, Region::Thumbs, Region::RightHand] {
            for indicator in default_arrangement(region) {
                let bit = 1u32 << indicator.button.index();
                assert_eq!(seen & bit, 0, "button drawn twice");
                seen |= bit;
            }
        }
    }

    #[test]
    fn test_indicators_fit_on_screen() {
        for region in [Region::LeftHand, Region::Thumbs, Region::RightHand] {
            for name in ["b0xx", "row"] {
                for indicator in arrangement(region, name).unwrap() {
                    assert!(u32::from(indicator.x) + u32::from(indicator.radius) < 128);
                    assert!(u32::from(indicator.y) + u32::from(indicator.radius) < 64);
                }
            }
        }
    }
}
