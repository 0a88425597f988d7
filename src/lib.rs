//! Driver for two NES/SNES controllers read through an RP2040 PIO block.
//!
//! A PIO state machine generates the latch and clock signals and samples
//! both data lines, pushing one 32-bit word per read cycle. The words are
//! published into a [`LatestState`] cell and can be translated into
//! Kempston and Sinclair joystick bytes by the functions in [`convert`].
//!
//! Everything except the [`nespad`] driver is plain bit manipulation and
//! builds on the host; the driver needs the `board` feature.

#![cfg_attr(not(test), no_std)]

pub mod bits;
pub mod button;
pub mod config;
pub mod convert;
pub mod error;
pub mod sequencer;
pub mod state;

#[cfg(feature = "board")]
pub mod nespad;

pub use bits::{bit_mask, bit_position, extract_and_relocate};
pub use button::{Button, Pad};
pub use config::NespadConfig;
pub use convert::{to_dual_left, to_dual_right, to_single_stick, ConversionTarget};
pub use error::Error;
pub use state::{LatestState, RawState, StateReader};

#[cfg(feature = "board")]
pub use nespad::{Nespad, NespadProgram};
