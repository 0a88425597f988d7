// Translation of the interleaved pad state into classic joystick encodings.
//
// Kempston interfaces read one byte, pressed = 1. Sinclair interfaces map
// two joysticks onto keyboard rows, so each stick is a 5-bit group with
// pressed = 0 and the unused upper bits read as 1.

use crate::bits::extract_and_relocate;
use crate::button::{Button, Pad};
use crate::state::RawState;


/// Source button and destination bit for one output line.
pub type Layout = [(Button, u32)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Pressed buttons read as 1.
    ActiveHigh,
    /// Pressed buttons read as 0; the whole byte is complemented.
    ActiveLow,
}

/// Kempston bit assignments. Bit 4 is the conventional fire button.
pub mod kempston {
    pub const RIGHT: u32 = 0;
    pub const LEFT: u32 = 1;
    pub const DOWN: u32 = 2;
    pub const UP: u32 = 3;
    pub const FIRE: u32 = 4;
    pub const BUTTON_1: u32 = 4;
    pub const BUTTON_2: u32 = 5;
    pub const BUTTON_3: u32 = 6;
    pub const BUTTON_0: u32 = 7;
}

/// Sinclair bit assignments. The left stick maps to keys 1-5, the right
/// stick to keys 6-0, which reverses the order inside its row.
pub mod sinclair {
    pub const LEFT_LEFT: u32 = 0;
    pub const LEFT_RIGHT: u32 = 1;
    pub const LEFT_DOWN: u32 = 2;
    pub const LEFT_UP: u32 = 3;
    pub const LEFT_FIRE: u32 = 4;

    pub const RIGHT_LEFT: u32 = 4;
    pub const RIGHT_RIGHT: u32 = 3;
    pub const RIGHT_DOWN: u32 = 2;
    pub const RIGHT_UP: u32 = 1;
    pub const RIGHT_FIRE: u32 = 0;
}

const SINGLE_STICK: [(Button, u32); 8] = [
    (Button::Right, kempston::RIGHT),
    (Button::Left, kempston::LEFT),
    (Button::Down, kempston::DOWN),
    (Button::Up, kempston::UP),
    (Button::B, kempston::BUTTON_0),
    // Y is both the second action button and the fire line
    (Button::Y, kempston::FIRE),
    (Button::A, kempston::BUTTON_2),
    (Button::X, kempston::BUTTON_3),
];

const DUAL_LEFT: [(Button, u32); 5] = [
    (Button::Right, sinclair::LEFT_RIGHT),
    (Button::Left, sinclair::LEFT_LEFT),
    (Button::Down, sinclair::LEFT_DOWN),
    (Button::Up, sinclair::LEFT_UP),
    (Button::B, sinclair::LEFT_FIRE),
];

const DUAL_RIGHT: [(Button, u32); 5] = [
    (Button::Right, sinclair::RIGHT_RIGHT),
    (Button::Left, sinclair::RIGHT_LEFT),
    (Button::Down, sinclair::RIGHT_DOWN),
    (Button::Up, sinclair::RIGHT_UP),
    (Button::B, sinclair::RIGHT_FIRE),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionTarget {
    SingleStick,
    DualLeft,
    DualRight,
}

impl ConversionTarget {
    pub const ALL: [ConversionTarget; 3] = [
        ConversionTarget::SingleStick,
        ConversionTarget::DualLeft,
        ConversionTarget::DualRight,
    ];

    pub fn layout(self) -> &'static Layout {
        match self {
            ConversionTarget::SingleStick => &SINGLE_STICK,
            ConversionTarget::DualLeft => &DUAL_LEFT,
            ConversionTarget::DualRight => &DUAL_RIGHT,
        }
    }

    pub fn polarity(self) -> Polarity {
        match self {
            ConversionTarget::SingleStick => Polarity::ActiveHigh,
            ConversionTarget::DualLeft | ConversionTarget::DualRight => Polarity::ActiveLow,
        }
    }

    pub fn convert(self, state: RawState, pad: Pad) -> u8 {
        let bits = gather(state, pad, self.layout());
        match self.polarity() {
            Polarity::ActiveHigh => (bits & 0xFF) as u8,
            Polarity::ActiveLow => (!bits & 0xFF) as u8,
        }
    }
}

fn gather(state: RawState, pad: Pad, layout: &Layout) -> u32 {
    layout.iter().fold(0, |acc, &(button, target)| {
        acc | extract_and_relocate(state.bits(), pad, button, target)
    })
}

/// Kempston byte for `pad`: directions in bits 0-3, four buttons in bits 4-7.
pub fn to_single_stick(state: RawState, pad: Pad) -> u8 {
    ConversionTarget::SingleStick.convert(state, pad)
}

/// Sinclair left joystick (keys 1-5) for `pad`, pressed = 0.
pub fn to_dual_left(state: RawState, pad: Pad) -> u8 {
    ConversionTarget::DualLeft.convert(state, pad)
}

/// Sinclair right joystick (keys 6-0) for `pad`, pressed = 0.
pub fn to_dual_right(state: RawState, pad: Pad) -> u8 {
    ConversionTarget::DualRight.convert(state, pad)
}
