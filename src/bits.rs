// Bit positions inside the sampled state word.
//
// The sequencer samples both data lines on every clock, so the two pads are
// interleaved: bit 0 is pad one's B, bit 1 is pad two's B, bit 2 is pad
// one's Y and so on up to bit 23.

use crate::button::{Button, Pad};

/// Index of the bit holding `button` of `pad`.
pub const fn bit_position(pad: Pad, button: Button) -> u32 {
    ((button as u32) << 1) + pad as u32
}

pub const fn bit_mask(pad: Pad, button: Button) -> u32 {
    1 << bit_position(pad, button)
}

/// Isolate the bit of `button` on `pad` and move it to `target`.
///
/// The result is either zero or has exactly the `target` bit set. A target
/// beyond bit 31 always gives zero.
pub const fn extract_and_relocate(state: u32, pad: Pad, button: Button, target: u32) -> u32 {
    let source = bit_position(pad, button);
    let bit = state & bit_mask(pad, button);

    if target > source {
        match bit.checked_shl(target - source) {
            Some(shifted) => shifted,
            None => 0,
        }
    } else if target < source {
        bit >> (source - target)
    } else {
        bit
    }
}
