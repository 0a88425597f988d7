#![no_std]
#![no_main]

mod usb_logger;

use defmt_rtt as _;
use panic_probe as _;

use core::fmt::Write;

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::config::Config;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio;
use embassy_time::Timer;
use nespad::config::{DEFAULT_CLOCK_PIN_BASE, DEFAULT_DATA_PIN_BASE};
use nespad::{
    to_dual_left, to_dual_right, to_single_stick, Button, LatestState, Nespad, NespadConfig,
    NespadProgram, Pad, RawState,
};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
});

#[embassy_executor::task]
async fn nespad_task(mut pad: Nespad<'static, PIO0, 0>) -> ! {
    pad.run().await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    info!("nespad serial test starting...");

    // Initialize USB serial logging
    let (usb_device, usb_class) = usb_logger::init_usb(p.USB);

    spawner.spawn(usb_logger::usb_task(usb_device).unwrap());
    spawner.spawn(usb_logger::usb_logger_task(usb_class).unwrap());

    usb_log!("Startup");

    let pio::Pio {
        mut common, sm0, ..
    } = pio::Pio::new(p.PIO0, Irqs);

    let program = NespadProgram::new(&mut common);

    static STATE: StaticCell<LatestState> = StaticCell::new();
    let cell = STATE.init(LatestState::new());

    // Pins below must match the default pin bases
    let config = NespadConfig::default();
    let pad = Nespad::new(
        &mut common,
        sm0,
        p.PIN_12,
        p.PIN_13,
        p.PIN_14,
        p.PIN_15,
        &program,
        cell,
        &config,
    );
    let reader = pad.reader();

    usb_log!(
        "Claimed sm 0: data GPIO{}/{}, clock/latch GPIO{}/{}, {} us per read",
        DEFAULT_DATA_PIN_BASE,
        DEFAULT_DATA_PIN_BASE + 1,
        DEFAULT_CLOCK_PIN_BASE,
        DEFAULT_CLOCK_PIN_BASE + 1,
        (config.sample_period_s() * 1e6) as u32
    );
    spawner.spawn(nespad_task(pad).unwrap());
    usb_log!("Waiting...");

    let mut last = None;
    loop {
        let state = reader.current_state();
        usb_log!("nespad_state = {:032b}", state.bits());

        if last != Some(state) {
            for which in Pad::BOTH {
                log_pad(state, which);
            }
            last = Some(state);
        }

        Timer::after_millis(40).await;
    }
}

fn log_pad(state: RawState, which: Pad) {
    let mut names: heapless::String<64> = heapless::String::new();
    for name in state.pressed(which).map(Button::name) {
        let _ = write!(&mut names, " {}", name);
    }
    usb_log!(
        "pad {}: buttons={:012b}{}",
        which.index() + 1,
        state.pad_buttons(which),
        names
    );
    usb_log!(
        "pad {}: kempston={:08b} sinclair_l={:08b} sinclair_r={:08b}",
        which.index() + 1,
        to_single_stick(state, which),
        to_dual_left(state, which),
        to_dual_right(state, which)
    );
}
