// Log lines for the demo, carried over a USB CDC-ACM serial port.

use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{Driver, InterruptHandler};
use embassy_rp::Peri;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_usb::class::cdc_acm::{CdcAcmClass, State};
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;

pub type UsbDriver = Driver<'static, USB>;

const MAX_PACKET: usize = 64;

/// Pending log lines. Full means the host is not reading; new lines are dropped.
pub static USB_LOG_CHANNEL: Channel<CriticalSectionRawMutex, heapless::String<128>, 16> =
    Channel::new();

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

struct Buffers {
    config_descriptor: [u8; 256],
    bos_descriptor: [u8; 256],
    control: [u8; MAX_PACKET],
    state: State<'static>,
}

pub fn init_usb(
    usb: Peri<'static, USB>,
) -> (UsbDevice<'static, UsbDriver>, CdcAcmClass<'static, UsbDriver>) {
    static BUFFERS: StaticCell<Buffers> = StaticCell::new();
    let bufs = BUFFERS.init(Buffers {
        config_descriptor: [0; 256],
        bos_descriptor: [0; 256],
        control: [0; MAX_PACKET],
        state: State::new(),
    });

    let mut config = Config::new(0x16c0, 0x27dd); // USB Test VID/PID
    config.product = Some("nespad serial test");

    let mut builder = Builder::new(
        Driver::new(usb, Irqs),
        config,
        &mut bufs.config_descriptor,
        &mut bufs.bos_descriptor,
        &mut [],
        &mut bufs.control,
    );
    let class = CdcAcmClass::new(&mut builder, &mut bufs.state, MAX_PACKET as u16);

    (builder.build(), class)
}

#[embassy_executor::task]
pub async fn usb_task(mut usb: UsbDevice<'static, UsbDriver>) -> ! {
    usb.run().await
}

/// Forwards queued log lines while a host is connected.
#[embassy_executor::task]
pub async fn usb_logger_task(mut class: CdcAcmClass<'static, UsbDriver>) -> ! {
    loop {
        class.wait_connection().await;

        'connected: loop {
            let msg = USB_LOG_CHANNEL.receive().await;
            let line = msg.as_bytes().chunks(MAX_PACKET).chain([&b"\r\n"[..]]);
            for packet in line {
                if class.write_packet(packet).await.is_err() {
                    break 'connected;
                }
            }
        }
    }
}

/// Format a line and queue it for the serial port without blocking.
#[macro_export]
macro_rules! usb_log {
    ($($arg:tt)*) => {{
        let mut s: heapless::String<128> = heapless::String::new();
        use core::fmt::Write;
        let _ = write!(&mut s, $($arg)*);
        let _ = $crate::usb_logger::USB_LOG_CHANNEL.try_send(s);
    }};
}
