// PIO program that clocks both pads and samples their data lines.
//
// Pin usage:
//   side-set bit 0 -> clock pin, side-set bit 1 -> latch pin (clock + 1)
//   in pins 0/1    -> data line of pad one / pad two
//
// Each cycle raises the latch for 16 PIO cycles, then takes 16 samples.
// A sample is taken while the clock is low and the clock is pulsed high
// afterwards to shift the next button onto the data line. The ISR shifts
// right with autopush at 32 bits, so the first sample of a cycle ends up in
// bits 0-1 and one word is pushed per cycle.

use fixed::traits::ToFixed;
use fixed::types::extra::U8;
use fixed::FixedU32;
use pio::{Assembler, InSource, JmpCondition, Program, SetDestination, SideSet};

pub const PROGRAM_SIZE: usize = 32;

/// Samples per cycle. Twelve are real buttons on a SNES pad, the rest read
/// as released.
pub const SAMPLES_PER_CYCLE: u32 = 16;

/// Bits shifted in per sample, one per data line.
pub const BITS_PER_SAMPLE: u8 = 2;

/// PIO cycles counted per clock period when deriving the divider.
pub const CYCLES_PER_CLOCK_PERIOD: f32 = 16.0;

/// Range of divider values the state machine accepts.
pub const MIN_CLOCK_DIVIDER: f32 = 1.0;
pub const MAX_CLOCK_DIVIDER: f32 = 65536.0;

const SIDE_IDLE: u8 = 0b00;
const SIDE_CLOCK: u8 = 0b01;
const SIDE_LATCH: u8 = 0b10;

pub fn build_program() -> Program<PROGRAM_SIZE> {
    let mut a = Assembler::<PROGRAM_SIZE>::new_with_side_set(SideSet::new(false, 2, false));

    let mut wrap_target = a.label();
    let mut wrap_source = a.label();
    let mut sample = a.label();

    a.bind(&mut wrap_target);

    // latch high for 16 cycles
    a.nop_with_delay_and_side_set(7, SIDE_LATCH);
    a.nop_with_delay_and_side_set(7, SIDE_LATCH);

    a.set_with_delay_and_side_set(SetDestination::X, (SAMPLES_PER_CYCLE - 1) as u8, 5, SIDE_IDLE);

    a.bind(&mut sample);
    a.in_with_delay_and_side_set(InSource::PINS, BITS_PER_SAMPLE, 1, SIDE_IDLE);
    a.nop_with_delay_and_side_set(7, SIDE_CLOCK);
    a.jmp_with_delay_and_side_set(JmpCondition::XDecNonZero, &mut sample, 5, SIDE_IDLE);

    a.bind(&mut wrap_source);

    a.assemble_with_wrap(wrap_source, wrap_target)
}

/// Clock divider for a given system clock and seconds per pad clock edge.
///
/// Periods shorter than the pads' settle time are accepted and simply
/// produce garbage samples. The result is clamped to what the PIO can run,
/// so no period makes the state machine configuration fail.
pub fn clock_divider(sys_hz: u32, clock_period_s: f32) -> FixedU32<U8> {
    let div = sys_hz as f32 * clock_period_s / CYCLES_PER_CLOCK_PERIOD;
    // NaN from a NaN period falls back to the fastest divider
    let div = if div.is_nan() { MIN_CLOCK_DIVIDER } else { div };
    div.clamp(MIN_CLOCK_DIVIDER, MAX_CLOCK_DIVIDER)
        .saturating_to_fixed()
}

/// Word the ISR holds after one full cycle, given the level of both data
/// lines at each sample (`[pad one, pad two]`, true = high).
pub fn pack_samples(samples: &[[bool; 2]; SAMPLES_PER_CYCLE as usize]) -> u32 {
    samples.iter().fold(0u32, |isr, &[first, second]| {
        let sample = u32::from(first) | (u32::from(second) << 1);
        (isr >> BITS_PER_SAMPLE) | (sample << (32 - BITS_PER_SAMPLE))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::bit_mask;
    use crate::button::{Button, Pad};
    use crate::state::LatestState;

    #[test]
    fn program_encoding() {
        let program = build_program();
        assert_eq!(
            &program.code[..],
            &[0xb742, 0xb742, 0xe52f, 0x4102, 0xaf42, 0x0543]
        );
        assert_eq!(program.wrap.target, 0);
        assert_eq!(program.wrap.source, 5);
        assert_eq!(program.origin, None);
    }

    #[test]
    fn default_divider_gives_one_read_per_millisecond() {
        let div = clock_divider(125_000_000, 59e-6);
        assert!((div.to_num::<f32>() - 460.9375).abs() < 0.01, "{div}");
    }

    #[test]
    fn divider_scales_with_period() {
        let slow = clock_divider(125_000_000, 24e-6).to_num::<f32>();
        let fast = clock_divider(125_000_000, 12e-6).to_num::<f32>();
        assert!((slow - 2.0 * fast).abs() < 0.01);
    }

    #[test]
    fn divider_stays_within_pio_limits() {
        let fast = clock_divider(125_000_000, 1e-9).to_num::<f32>();
        let slow = clock_divider(125_000_000, 1e-2).to_num::<f32>();
        assert_eq!(fast, MIN_CLOCK_DIVIDER);
        assert_eq!(slow, MAX_CLOCK_DIVIDER);

        for period in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let div = clock_divider(125_000_000, period).to_num::<f32>();
            assert!((MIN_CLOCK_DIVIDER..=MAX_CLOCK_DIVIDER).contains(&div), "{period} -> {div}");
        }
    }

    #[test]
    fn first_sample_lands_in_lowest_bits() {
        let mut samples = [[false; 2]; 16];
        samples[0] = [true, false];
        assert_eq!(pack_samples(&samples), 0b01);

        samples[0] = [false, true];
        assert_eq!(pack_samples(&samples), 0b10);

        samples[0] = [false; 2];
        samples[15] = [true, true];
        assert_eq!(pack_samples(&samples), 0b11 << 30);
    }

    #[test]
    fn shift_order_matches_bit_positions() {
        for pad in Pad::BOTH {
            for button in Button::ALL {
                // Lines idle high; the pressed button pulls its line low.
                let mut samples = [[true; 2]; 16];
                samples[usize::from(button.index())][usize::from(pad.index())] = false;

                let cell = LatestState::new();
                cell.drain([pack_samples(&samples)]);
                assert_eq!(cell.current().bits(), bit_mask(pad, button));
            }
        }
    }
}
