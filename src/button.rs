// Button and pad vocabulary shared by the sequencer output and the converters.

use crate::error::Error;

/// Buttons in the order a SNES pad shifts them out after the latch pulse.
///
/// An 8-bit NES pad shifts out the first eight positions only (B to Right).
/// Its own A and B buttons land on [`Button::B`] and [`Button::Y`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Button {
    B = 0,
    Y = 1,
    Select = 2,
    Start = 3,
    Up = 4,
    Down = 5,
    Left = 6,
    Right = 7,
    A = 8,
    X = 9,
    LeftShoulder = 10,
    RightShoulder = 11,
}

impl Button {
    /// All twelve buttons, in shift order.
    pub const ALL: [Button; 12] = [
        Button::B,
        Button::Y,
        Button::Select,
        Button::Start,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::A,
        Button::X,
        Button::LeftShoulder,
        Button::RightShoulder,
    ];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Button::B => "B",
            Button::Y => "Y",
            Button::Select => "Select",
            Button::Start => "Start",
            Button::Up => "Up",
            Button::Down => "Down",
            Button::Left => "Left",
            Button::Right => "Right",
            Button::A => "A",
            Button::X => "X",
            Button::LeftShoulder => "L",
            Button::RightShoulder => "R",
        }
    }
}

impl TryFrom<u8> for Button {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Button::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(Error::InvalidButton(index))
    }
}

/// Which of the two controllers. Pad one sits on the first data pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Pad {
    One = 0,
    Two = 1,
}

impl Pad {
    pub const BOTH: [Pad; 2] = [Pad::One, Pad::Two];

    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Pad {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Pad::One),
            1 => Ok(Pad::Two),
            other => Err(Error::InvalidPad(other)),
        }
    }
}
