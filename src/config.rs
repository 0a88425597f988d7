// Driver configuration and the default wiring.

/// Default seconds per clock edge.
///
/// Much slower than the 12 µs a console uses; 59 µs gives about one full
/// read of both pads per millisecond, plenty for callers that poll.
pub const DEFAULT_CLOCK_PERIOD_S: f32 = 59e-6;

/// GPIO of pad one's data line. Pad two is on the next pin.
pub const DEFAULT_DATA_PIN_BASE: u8 = 12;

/// GPIO of the shared clock line. The latch is on the next pin.
pub const DEFAULT_CLOCK_PIN_BASE: u8 = 14;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NespadConfig {
    pub clock_period_s: f32,
}

impl NespadConfig {
    pub const fn new() -> Self {
        Self {
            clock_period_s: DEFAULT_CLOCK_PERIOD_S,
        }
    }

    pub const fn with_clock_period(mut self, clock_period_s: f32) -> Self {
        self.clock_period_s = clock_period_s;
        self
    }

    /// Approximate time between two published states.
    pub fn sample_period_s(&self) -> f32 {
        self.clock_period_s * crate::sequencer::SAMPLES_PER_CYCLE as f32
    }
}

impl Default for NespadConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = NespadConfig::default();
        assert_eq!(config.clock_period_s, DEFAULT_CLOCK_PERIOD_S);
        assert!((config.sample_period_s() - 0.000944).abs() < 1e-6);
    }

    #[test]
    fn default_pin_pairs_do_not_overlap() {
        let data = DEFAULT_DATA_PIN_BASE..DEFAULT_DATA_PIN_BASE + 2;
        let clock = DEFAULT_CLOCK_PIN_BASE..DEFAULT_CLOCK_PIN_BASE + 2;
        assert!(data.end <= clock.start || clock.end <= data.start);
        assert!(data.end.max(clock.end) <= 30, "RP2040 has GPIO 0-29");
    }

    #[test]
    fn override_clock_period() {
        let config = NespadConfig::new().with_clock_period(12e-6);
        assert_eq!(config.clock_period_s, 12e-6);
    }
}
