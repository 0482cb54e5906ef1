//! Communication backend implementations.
//!
//! One variant per protocol the controller can speak; the choice is
//! made once at bootstrap and never changes afterwards.

pub mod dinput;
pub mod gamecube;
pub mod n64;
pub mod switch;
pub mod viewer;
pub mod xinput;

pub use dinput::DInputBackend;
pub use gamecube::GamecubeBackend;
pub use n64::N64Backend;
pub use switch::SwitchBackend;
pub use viewer::ViewerBackend;
pub use xinput::XInputBackend;

use crossbox_core::{CommunicationBackend, InputSnapshot, ReportError};
use crossbox_modes::ActiveMode;

/// The backend selected at bootstrap.
pub enum Backend {
    XInput(XInputBackend),
    DInput(DInputBackend),
    Switch(SwitchBackend),
    Gamecube(GamecubeBackend),
    N64(N64Backend),
    Viewer(ViewerBackend),
}

impl CommunicationBackend for Backend {
    type Mode = ActiveMode;

    fn snapshot(&self) -> &InputSnapshot {
        match self {
            Backend::XInput(b) => b.snapshot(),
            Backend::DInput(b) => b.snapshot(),
            Backend::Switch(b) => b.snapshot(),
            Backend::Gamecube(b) => b.snapshot(),
            Backend::N64(b) => b.snapshot(),
            Backend::Viewer(b) => b.snapshot(),
        }
    }

    fn set_mode(&mut self, mode: ActiveMode) {
        match self {
            Backend::XInput(b) => b.set_mode(mode),
            Backend::DInput(b) => b.set_mode(mode),
            Backend::Switch(b) => b.set_mode(mode),
            Backend::Gamecube(b) => b.set_mode(mode),
            Backend::N64(b) => b.set_mode(mode),
            // The viewer mirrors raw inputs; it has no processing mode.
            Backend::Viewer(_) => {}
        }
    }

    async fn send_report(&mut self) -> Result<(), ReportError> {
        match self {
            Backend::XInput(b) => b.send_report().await,
            Backend::DInput(b) => b.send_report().await,
            Backend::Switch(b) => b.send_report().await,
            Backend::Gamecube(b) => b.send_report().await,
            Backend::N64(b) => b.send_report().await,
            Backend::Viewer(b) => b.send_report().await,
        }
    }
}
