//! Platform-agnostic orchestration core for the crossbox controller
//! firmware.
//!
//! This crate decides, once at power-on, which communication backend and
//! which default input-processing mode the controller runs, and
//! coordinates the two execution contexts that share the live button
//! state: the latency-critical report loop and the slower status loop.
//!
//! # Overview
//!
//! - [`buttons`]: Physical buttons and captured frames ([`Button`], [`Buttons`])
//! - [`snapshot`]: The live, lock-free shared state record ([`InputSnapshot`])
//! - [`pinout`]: Compile-time pin assignment tables ([`PinAssignment`], [`Pinout`])
//! - [`input`]: Input source trait ([`InputSource`])
//! - [`backend`]: Backend trait and the fixed backend set ([`CommunicationBackend`], [`BackendSet`])
//! - [`mode`]: Input-processing policy traits ([`GameMode`], [`KeyboardMode`], [`ModeSwitch`])
//! - [`bootstrap`]: Boot-time backend and mode selection ([`plan`], [`BootPlan`])
//! - [`gate`]: One-shot cross-context readiness gate ([`ReadyGate`])
//! - [`report`]: The report loop run on the primary context ([`ReportLoop`])
//! - [`status`]: The status loop run on the secondary context ([`StatusLoop`])
//! - [`display`]: Presentational state ([`DisplayState`], [`ModeLabel`])
//! - [`layout`]: Indicator arrangement tables for the status display
//!
//! # Concurrency contract
//!
//! Bootstrap runs on the primary context and publishes the shared
//! runtime through the [`ReadyGate`] as its last action; the secondary
//! context spins on the gate before doing any work. That publish/wait
//! pair is the only synchronization between the contexts. The
//! [`InputSnapshot`] itself is shared lock-free: every flag is only ever
//! stored with its latest physical reading, both sides tolerate torn
//! reads, and nothing read-modify-writes a flag. Keep it that way; a
//! lock here would eat into the report loop's protocol timing budget.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod backend;
pub mod bootstrap;
pub mod buttons;
pub mod display;
pub mod gate;
pub mod input;
pub mod layout;
pub mod mode;
pub mod pinout;
pub mod report;
pub mod snapshot;
pub mod status;

// Re-export main types at crate root
pub use backend::{BackendSet, CommunicationBackend, ReportError};
pub use bootstrap::{
    display_state_for, plan, wants_firmware_update, BackendSelection, BootPlan, ConsoleIdentity,
    DefaultMode, SharedRuntime,
};
pub use buttons::{Button, Buttons};
pub use display::{DisplayState, ModeLabel, STATUS_COLUMNS};
pub use gate::ReadyGate;
pub use input::{InputError, InputSource};
pub use layout::{Indicator, Region};
pub use mode::{ControlOutput, GameMode, KeyboardMode, ModeSwitch, STICK_NEUTRAL};
pub use pinout::{PinAssignment, Pinout};
pub use report::ReportLoop;
pub use snapshot::InputSnapshot;
pub use status::{StatusLoop, StatusSurface, StatusView};
