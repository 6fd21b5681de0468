#![no_std]
#![no_main]

#[macro_use]
extern crate log;

use bsp::hal::gpio::GPIO;
use bsp::hal::iomuxc::{configure, Config as PadConfig, PullKeep, PullKeepSelect, PullUpDown};
use bsp::interrupt;
use encoder_tracker::{Config, Dispatcher, Shared, Tracker};
use teensy4_bsp as bsp;

use crate::pin::KnobPin;

mod logging;
mod pin;

type KnobA = KnobPin<bsp::common::P11>;
type KnobB = KnobPin<bsp::common::P12>;

/// The knob contacts close to ground.
const PULL_UP: PadConfig = PadConfig::zero()
    .set_pull_keep(PullKeep::Enabled)
    .set_pull_keep_select(PullKeepSelect::Pull)
    .set_pullupdown(PullUpDown::Pullup22k);

static KNOB: Shared<KnobA, KnobB> = Shared::new();

// p11 (B0_02) and p12 (B0_01) are GPIO2_IO02 and GPIO2_IO01.
static GPIO2_LOW: Dispatcher<2> = Dispatcher::new();

#[cortex_m_rt::interrupt]
fn GPIO2_Combined_0_15() {
    GPIO2_LOW.dispatch();
}

#[cortex_m_rt::entry]
fn main() -> ! {
    assert!(logging::init().is_ok());

    let p = bsp::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();
    let mut systick = bsp::SysTick::new(cp.SYST);

    // Wait so we don't miss the first log message, crashes etc.
    systick.delay(1000);

    let mut pins = bsp::t40::into_pins(p.iomuxc);
    configure(&mut pins.p11, PULL_UP);
    configure(&mut pins.p12, PULL_UP);

    let a = KnobPin::new(GPIO::new(pins.p11));
    let b = KnobPin::new(GPIO::new(pins.p12));

    KNOB.init(Tracker::with_config(a, b, Config::full())).unwrap();
    GPIO2_LOW.register(&KNOB).unwrap();

    // Both pins map to the same interrupt.
    unsafe { cortex_m::peripheral::NVIC::unmask(interrupt::GPIO2_Combined_0_15) };

    loop {
        let incr = KNOB.incr_pos().unwrap();

        if incr != 0 {
            let pos = KNOB.pos().unwrap();
            info!("moved {} to {}", incr, pos);

            // Keep it on a 0-99 dial.
            if pos < 0 || pos > 99 {
                KNOB.set_pos(pos.clamp(0, 99)).unwrap();
            }
        }

        systick.delay(10);
    }
}

#[panic_handler]
fn panic(p: &core::panic::PanicInfo) -> ! {
    error!("{:?}", p);
    loop {}
}
