use core::iter;

use defmt::{debug, info};
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::gpio::{Level, Pull};
use embassy_rp::pio::{
    Common, Config, Direction, FifoJoin, Instance, LoadedProgram, PioPin, ShiftConfig,
    ShiftDirection, StateMachine,
};
use embassy_rp::Peri;

use crate::config::NespadConfig;
use crate::sequencer::{build_program, clock_divider};
use crate::state::{LatestState, RawState, StateReader};

// NES/SNES pad reader using PIO
// The state machine clocks both pads and pushes one word per read cycle.

pub struct NespadProgram<'d, PIO: Instance> {
    prg: LoadedProgram<'d, PIO>,
}

impl<'d, PIO: Instance> NespadProgram<'d, PIO> {
    pub fn new(common: &mut Common<'d, PIO>) -> Self {
        debug!("nespad: adding program");
        let prg = build_program();
        Self {
            prg: common.load_program(&prg),
        }
    }
}

pub struct Nespad<'d, PIO: Instance, const SM: usize> {
    sm: StateMachine<'d, PIO, SM>,
    state: &'d LatestState,
}

impl<'d, PIO: Instance, const SM: usize> Nespad<'d, PIO, SM> {
    /// Configure `sm` and start it.
    ///
    /// The data pins must be consecutive (pad one first), as must the clock
    /// and latch pins (clock first). The PIO interrupt must already be bound
    /// to `embassy_rp::pio::InterruptHandler` for [`Nespad::run`] to wake.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        common: &mut Common<'d, PIO>,
        mut sm: StateMachine<'d, PIO, SM>,
        data0: Peri<'d, impl PioPin>,
        data1: Peri<'d, impl PioPin>,
        clock: Peri<'d, impl PioPin>,
        latch: Peri<'d, impl PioPin>,
        program: &NespadProgram<'d, PIO>,
        state: &'d LatestState,
        config: &NespadConfig,
    ) -> Self {
        debug!("nespad: setting up GPIO");

        let mut data0 = common.make_pio_pin(data0);
        let mut data1 = common.make_pio_pin(data1);
        data0.set_pull(Pull::Up);
        data1.set_pull(Pull::Up);
        let clock = common.make_pio_pin(clock);
        let latch = common.make_pio_pin(latch);

        let mut cfg = Config::default();

        // Side-set base is the clock pin, latch is side-set bit 1
        cfg.use_program(&program.prg, &[&clock, &latch]);
        cfg.set_in_pins(&[&data0, &data1]);

        // In shift: right, autopush once all 16 two-bit samples are in
        cfg.shift_in = ShiftConfig {
            auto_fill: true,
            direction: ShiftDirection::Right,
            threshold: 32,
        };

        let sys_hz = clk_sys_freq();
        cfg.clock_divider = clock_divider(sys_hz, config.clock_period_s);
        debug!(
            "nespad: clk_sys {} Hz, clock period {} s",
            sys_hz, config.clock_period_s
        );

        cfg.fifo_join = FifoJoin::Duplex;

        sm.set_config(&cfg);
        sm.set_pin_dirs(Direction::Out, &[&clock, &latch]);
        sm.set_pin_dirs(Direction::In, &[&data0, &data1]);
        sm.set_pins(Level::Low, &[&clock, &latch]);

        sm.set_enable(true);
        info!("nespad: state machine {} running", SM);

        Self { sm, state }
    }

    pub fn reader(&self) -> StateReader<'d> {
        self.state.reader()
    }

    pub fn current_state(&self) -> RawState {
        self.state.current()
    }

    /// Publish sampled words forever.
    ///
    /// Wakes on the RX-not-empty interrupt, then empties the FIFO so only
    /// the newest word survives.
    pub async fn run(&mut self) -> ! {
        loop {
            let first = self.sm.rx().wait_pull().await;
            let rx = self.sm.rx();
            self.state
                .drain(iter::once(first).chain(iter::from_fn(|| rx.try_pull())));
        }
    }
}
