//! USB logging support

use bsp::hal::ral::usb::USB1;
use bsp::interrupt;
use log::LevelFilter;
use teensy4_bsp as bsp;

/// Trace is only useful while debugging the decoder, every edge logs.
const FILTERS: &[bsp::usb::Filter] = &[("encoder_tracker", Some(LevelFilter::Debug))];

static mut POLLER: Option<bsp::usb::Poller> = None;

/// Initialize the USB logging system and hook up the USB ISR.
///
/// Call this once, before anything logs.
///
/// # Panics
///
/// Panics if the imxrt-ral USB1 instance is already taken.
pub fn init() -> Result<bsp::usb::Reader, bsp::usb::Error> {
    let inst = USB1::take().unwrap();
    let (poller, reader) = bsp::usb::init(
        inst,
        bsp::usb::LoggingConfig {
            filters: FILTERS,
            max_level: LevelFilter::Trace,
            ..Default::default()
        },
    )?;

    critical_section::with(|_cs| unsafe {
        POLLER = Some(poller);

        // Safety: the poller is in place before the ISR can run.
        cortex_m::peripheral::NVIC::unmask(bsp::interrupt::USB_OTG1);
    });

    Ok(reader)
}

#[cortex_m_rt::interrupt]
fn USB_OTG1() {
    critical_section::with(|_cs| {
        if let Some(poller) = unsafe { POLLER.as_mut() } {
            poller.poll();
        }
    });
}
