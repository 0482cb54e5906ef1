//! Boot-time backend and mode selection.
//!
//! The decision logic is a pure function of the buttons held at plug-in
//! and the console detection result; the firmware's boot task performs
//! the side effects (interlock reset, LED, probe, construction, gate
//! publish) around it in a fixed order.

use crate::buttons::{Button, Buttons};
use crate::display::{DisplayState, ModeLabel};
use crate::snapshot::InputSnapshot;

/// Result of the one-shot console attach probe.
///
/// Produced exactly once at startup; a probe timeout resolves to
/// `None` rather than an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleIdentity {
    None,
    GameCube,
    N64,
}

/// Which communication backend to construct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BackendSelection {
    XInputUsb,
    DInputUsb,
    SwitchUsb,
    GamecubeJoybus,
    N64Joybus,
}

/// Which default game mode to attach at boot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DefaultMode {
    /// Melee with second-input SOCD (no reactivation), crouch-walk
    /// option off.
    Melee,
    /// Ultimate with second-input SOCD.
    Ultimate,
}

/// The constructed boot plan.
///
/// `backend_label`/`mode_label` are `None` on the Switch override path,
/// which returns early without touching the display labels; the other
/// paths fall through to the common label and mode assignment. That
/// asymmetry is inherited behavior and is preserved on purpose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootPlan {
    pub backend: BackendSelection,
    pub with_viewer: bool,
    pub default_mode: DefaultMode,
    pub backend_label: Option<&'static str>,
    pub mode_label: Option<ModeLabel>,
}

/// Whether the firmware-update interlock is engaged.
///
/// Must be checked before any other bootstrap side effect; when it
/// holds, control transfers to the platform's update entry point and
/// never returns.
#[inline]
#[must_use]
pub const fn wants_firmware_update(held: Buttons) -> bool {
    held.contains(Button::Start)
}

/// Map power-on holds and the detection result to a boot plan.
///
/// With no console detected, override holds are checked in fixed
/// priority order (X, then Z) and only the first match takes effect;
/// holds are not combinable. A detected console always yields a
/// single-backend set: the physical link is saturated by protocol
/// timing, so no viewer rides along.
#[must_use]
pub fn plan(held: Buttons, console: ConsoleIdentity) -> BootPlan {
    match console {
        ConsoleIdentity::None => {
            if held.contains(Button::X) {
                // Switch USB, alone and with its own default mode.
                BootPlan {
                    backend: BackendSelection::SwitchUsb,
                    with_viewer: false,
                    default_mode: DefaultMode::Ultimate,
                    backend_label: None,
                    mode_label: None,
                }
            } else if held.contains(Button::Z) {
                BootPlan {
                    backend: BackendSelection::DInputUsb,
                    with_viewer: true,
                    default_mode: DefaultMode::Melee,
                    backend_label: Some("DINPUT"),
                    mode_label: Some(ModeLabel::Melee),
                }
            } else {
                BootPlan {
                    backend: BackendSelection::XInputUsb,
                    with_viewer: true,
                    default_mode: DefaultMode::Melee,
                    backend_label: Some("XINPUT"),
                    mode_label: Some(ModeLabel::Melee),
                }
            }
        }
        ConsoleIdentity::GameCube => BootPlan {
            backend: BackendSelection::GamecubeJoybus,
            with_viewer: false,
            default_mode: DefaultMode::Melee,
            backend_label: Some("GCN"),
            mode_label: Some(ModeLabel::Melee),
        },
        ConsoleIdentity::N64 => BootPlan {
            backend: BackendSelection::N64Joybus,
            with_viewer: false,
            default_mode: DefaultMode::Melee,
            backend_label: Some("N64"),
            mode_label: Some(ModeLabel::Melee),
        },
    }
}

/// Apply a plan's label assignments to a fresh display state.
#[must_use]
pub fn display_state_for(plan: &BootPlan) -> DisplayState {
    let mut state = DisplayState::new();
    if let Some(label) = plan.backend_label {
        state.backend_label = label;
    }
    if let Some(mode) = plan.mode_label {
        state.mode = Some(mode);
    }
    state
}

/// Everything the secondary context needs, published through the gate.
///
/// The snapshot reference is the primary backend's live record; the
/// display state carries the labels bootstrap assigned. Published once,
/// never replaced.
pub struct SharedRuntime {
    pub snapshot: &'static InputSnapshot,
    pub display: DisplayState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interlock_outranks_everything() {
        let held = Buttons::NONE
            .with(Button::Start)
            .with(Button::X)
            .with(Button::Z);
        assert!(wants_firmware_update(held));
        assert!(!wants_firmware_update(Buttons::NONE.with(Button::X)));
    }

    #[test]
    fn test_default_is_xinput_with_viewer() {
        let plan = plan(Buttons::NONE, ConsoleIdentity::None);
        assert_eq!(plan.backend, BackendSelection::XInputUsb);
        assert!(plan.with_viewer);
        assert_eq!(plan.default_mode, DefaultMode::Melee);
        assert_eq!(plan.backend_label, Some("XINPUT"));
        assert_eq!(plan.mode_label, Some(ModeLabel::Melee));
    }

    #[test]
    fn test_x_hold_selects_switch_alone() {
        let p = plan(Buttons::NONE.with(Button::X), ConsoleIdentity::None);
        assert_eq!(p.backend, BackendSelection::SwitchUsb);
        assert!(!p.with_viewer);
        assert_eq!(p.default_mode, DefaultMode::Ultimate);
        // Early-return path: labels stay at their placeholders.
        assert_eq!(p.backend_label, None);
        assert_eq!(p.mode_label, None);
    }

    #[test]
    fn test_z_hold_selects_dinput_with_viewer() {
        let p = plan(Buttons::NONE.with(Button::Z), ConsoleIdentity::None);
        assert_eq!(p.backend, BackendSelection::DInputUsb);
        assert!(p.with_viewer);
        assert_eq!(p.backend_label, Some("DINPUT"));
    }

    #[test]
    fn test_first_override_wins() {
        let both = Buttons::NONE.with(Button::X).with(Button::Z);
        assert_eq!(
            plan(both, ConsoleIdentity::None),
            plan(Buttons::NONE.with(Button::X), ConsoleIdentity::None)
        );
    }

    #[test]
    fn test_console_ignores_overrides() {
        for held in [
            Buttons::NONE,
            Buttons::NONE.with(Button::X),
            Buttons::NONE.with(Button::Z),
            Buttons::NONE.with(Button::X).with(Button::Z),
        ] {
            let p = plan(held, ConsoleIdentity::GameCube);
            assert_eq!(p.backend, BackendSelection::GamecubeJoybus);
            assert!(!p.with_viewer);
            assert_eq!(p.backend_label, Some("GCN"));

            let p = plan(held, ConsoleIdentity::N64);
            assert_eq!(p.backend, BackendSelection::N64Joybus);
            assert!(!p.with_viewer);
            assert_eq!(p.backend_label, Some("N64"));
        }
    }

    #[test]
    fn test_console_paths_default_to_melee() {
        for console in [ConsoleIdentity::GameCube, ConsoleIdentity::N64] {
            let p = plan(Buttons::NONE, console);
            assert_eq!(p.default_mode, DefaultMode::Melee);
            assert_eq!(p.mode_label, Some(ModeLabel::Melee));
        }
    }

    #[test]
    fn test_display_state_for_plan() {
        let state = display_state_for(&plan(Buttons::NONE, ConsoleIdentity::None));
        assert_eq!(state.backend_label, "XINPUT");
        assert_eq!(state.mode, Some(ModeLabel::Melee));

        // Switch path leaves the placeholders in place.
        let state = display_state_for(&plan(
            Buttons::NONE.with(Button::X),
            ConsoleIdentity::None,
        ));
        assert_eq!(state.backend_label, "BACKEND");
        assert_eq!(state.mode, None);
    }
}
