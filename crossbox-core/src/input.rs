//! Input source trait and error types.

use core::future::Future;

use crate::snapshot::InputSnapshot;

/// Error type for input refresh operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Bus/communication I/O error.
    Io,
    /// Peripheral not present or went away.
    Disconnected,
    /// Peripheral returned an unusable frame.
    Decode,
}

/// A provider of physical input state.
///
/// Implementations overwrite the snapshot flags they own with their
/// latest physical reading (GPIO matrix, Nunchuk). `refresh` must be
/// callable repeatedly and must not block indefinitely.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap
/// allocation.
pub trait InputSource {
    /// Refresh this source's contribution to the snapshot.
    fn refresh(&mut self, snapshot: &InputSnapshot)
        -> impl Future<Output = Result<(), InputError>>;
}
