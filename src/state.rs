// Latest sampled controller state.
//
// The pads idle high and pull the data line low for a pressed button, so the
// words coming out of the sequencer are inverted before being stored.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::bits::{bit_mask, bit_position};
use crate::button::{Button, Pad};

/// One sampled word, pressed = 1. See [`bit_position`] for the layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawState(pub u32);

impl RawState {
    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_pressed(self, pad: Pad, button: Button) -> bool {
        self.0 & bit_mask(pad, button) != 0
    }

    /// Buttons of one pad packed side by side, bit n = button index n.
    pub fn pad_buttons(self, pad: Pad) -> u16 {
        Button::ALL.iter().fold(0u16, |acc, &button| {
            let bit = (self.0 >> bit_position(pad, button)) & 1;
            acc | ((bit as u16) << button.index())
        })
    }

    pub fn pressed(self, pad: Pad) -> impl Iterator<Item = Button> {
        Button::ALL
            .into_iter()
            .filter(move |&button| self.is_pressed(pad, button))
    }
}

impl From<u32> for RawState {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<RawState> for u32 {
    fn from(state: RawState) -> Self {
        state.0
    }
}

/// Single-word cell written by the publisher and read by everyone else.
///
/// Only atomic loads and stores are used, which the Cortex-M0+ supports.
pub struct LatestState {
    word: AtomicU32,
}

impl LatestState {
    pub const fn new() -> Self {
        Self {
            word: AtomicU32::new(0),
        }
    }

    /// Store the complement of each raw sequencer word, keeping only the last.
    pub fn drain<I>(&self, words: I)
    where
        I: IntoIterator<Item = u32>,
    {
        for raw in words {
            self.word.store(!raw, Ordering::Release);
        }
    }

    pub fn current(&self) -> RawState {
        RawState(self.word.load(Ordering::Acquire))
    }

    pub fn reader(&self) -> StateReader<'_> {
        StateReader { cell: self }
    }
}

impl Default for LatestState {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only handle to a [`LatestState`].
#[derive(Clone, Copy)]
pub struct StateReader<'a> {
    cell: &'a LatestState,
}

impl StateReader<'_> {
    pub fn current_state(&self) -> RawState {
        self.cell.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn starts_with_nothing_pressed() {
        let cell = LatestState::new();
        assert_eq!(cell.current(), RawState(0));
        assert_eq!(cell.reader().current_state(), RawState(0));
    }

    #[test]
    fn drain_inverts_and_keeps_last_word() {
        let cell = LatestState::new();
        cell.drain([0xFFFF_FFFF, 0x0000_0000, 0xFFFF_FFFE]);
        assert_eq!(cell.current(), RawState(1));
    }

    #[test]
    fn empty_drain_keeps_previous_value() {
        let cell = LatestState::new();
        cell.drain([!0x42]);
        cell.drain(core::iter::empty());
        assert_eq!(cell.current().bits(), 0x42);
    }

    #[test]
    fn idle_lines_read_as_released() {
        // Data lines held high by the pull-ups give an all-ones sample.
        let cell = LatestState::new();
        cell.drain([u32::MAX]);
        for pad in Pad::BOTH {
            assert_eq!(cell.current().pressed(pad).count(), 0);
        }
    }

    #[test]
    fn pad_buttons_compacts_one_pad() {
        let state = RawState(
            bit_mask(Pad::Two, Button::B)
                | bit_mask(Pad::Two, Button::Start)
                | bit_mask(Pad::Two, Button::RightShoulder)
                | bit_mask(Pad::One, Button::Up),
        );
        assert_eq!(state.pad_buttons(Pad::Two), 0b1000_0000_1001);
        assert_eq!(state.pad_buttons(Pad::One), 1 << 4);

        let mut pressed = state.pressed(Pad::Two);
        assert_eq!(pressed.next(), Some(Button::B));
        assert_eq!(pressed.next(), Some(Button::Start));
        assert_eq!(pressed.next(), Some(Button::RightShoulder));
        assert_eq!(pressed.next(), None);
    }

    #[test]
    fn concurrent_reads_are_never_torn() {
        const A: u32 = 0x00AA_AAAA;
        const B: u32 = 0x0055_5555;

        let cell = Arc::new(LatestState::new());
        let done = Arc::new(AtomicBool::new(false));

        let writer = {
            let cell = Arc::clone(&cell);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                for i in 0..200_000u32 {
                    if i % 2 == 0 {
                        cell.drain([!A, !B]);
                    } else {
                        cell.drain([!B, !A]);
                    }
                }
                done.store(true, Ordering::Release);
            })
        };

        let readers: Vec<_> = (0..3)
            .map(|_| {
                let cell = Arc::clone(&cell);
                let done = Arc::clone(&done);
                thread::spawn(move || {
                    let reader = cell.reader();
                    while !done.load(Ordering::Acquire) {
                        let seen = reader.current_state().bits();
                        assert!(seen == 0 || seen == A || seen == B, "torn read {seen:#010x}");
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }
}
