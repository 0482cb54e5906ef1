//! Passive input-viewer backend.
//!
//! Mirrors the primary backend's snapshot over CDC-ACM for a desktop
//! overlay. Never consulted for control decisions, owns no input
//! sources and has no processing mode; it just encodes whatever the
//! snapshot holds at the instant of the report.

use crossbox_core::{CommunicationBackend, InputSnapshot, ReportError};
use crossbox_modes::ActiveMode;

use crate::usb::ViewerSender;

pub struct ViewerBackend {
    snapshot: &'static InputSnapshot,
    sender: ViewerSender,
}

impl ViewerBackend {
    #[must_use]
    pub fn new(snapshot: &'static InputSnapshot, sender: ViewerSender) -> Self {
        Self { snapshot, sender }
    }
}

impl CommunicationBackend for ViewerBackend {
    type Mode = ActiveMode;

    fn snapshot(&self) -> &InputSnapshot {
        self.snapshot
    }

    fn set_mode(&mut self, _mode: ActiveMode) {}

    async fn send_report(&mut self) -> Result<(), ReportError> {
        // No overlay listening: skip the frame instead of blocking the
        // report cycle on a dead serial port.
        if !self.sender.dtr() {
            return Ok(());
        }

        let frame = viewer_proto::encode_frame(self.snapshot.capture());
        self.sender
            .write_packet(&frame)
            .await
            .map_err(|_| ReportError::Io)
    }
}
