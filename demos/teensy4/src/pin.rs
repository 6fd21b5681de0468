//! GPIO change interrupts on the imxrt, straight on the registers until imxrt-hal
//! exposes them: https://github.com/imxrt-rs/imxrt-hal/pull/110

use core::convert::Infallible;

use bsp::hal::gpio::{Input, GPIO};
use embedded_hal::digital::v2::InputPin;
use encoder_tracker::{Interrupt, InterruptConfiguration};
use imxrt_hal::iomuxc::{consts::Unsigned, gpio::Pin};
use imxrt_ral as ral;
use imxrt_ral::gpio::{self, RegisterBlock};
use teensy4_bsp as bsp;

/// Wrapper type because we're not allowed to do:
/// impl<P> Interrupt for GPIO<P, Input> {}
pub struct KnobPin<P>(GPIO<P, Input>);

impl<P> KnobPin<P>
where
    P: Pin,
{
    pub fn new(gpio: GPIO<P, Input>) -> Self {
        KnobPin(gpio)
    }

    fn register_block(&self) -> *const RegisterBlock {
        const REGISTER_BLOCKS: [*const RegisterBlock; 9] = [
            gpio::GPIO1,
            gpio::GPIO2,
            gpio::GPIO3,
            gpio::GPIO4,
            gpio::GPIO5,
            gpio::GPIO6,
            gpio::GPIO7,
            gpio::GPIO8,
            gpio::GPIO9,
        ];
        REGISTER_BLOCKS[(<P as Pin>::Module::USIZE).wrapping_sub(1)]
    }

    fn mask(&self) -> u32 {
        1u32 << <P as Pin>::Offset::USIZE
    }
}

impl<P> InputPin for KnobPin<P>
where
    P: Pin,
{
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Infallible> {
        Ok(self.0.is_set())
    }

    fn is_low(&self) -> Result<bool, Infallible> {
        Ok(!self.0.is_set())
    }
}

impl<P> Interrupt for KnobPin<P>
where
    P: Pin,
{
    fn set_interrupt_enable(&mut self, enable: bool) {
        critical_section::with(|_| unsafe {
            ral::modify_reg!(ral::gpio, self.register_block(), IMR, |imr| if enable {
                imr | self.mask()
            } else {
                imr & !self.mask()
            })
        });
    }

    fn is_interrupt_enabled(&self) -> bool {
        unsafe { ral::read_reg!(ral::gpio, self.register_block(), IMR) & self.mask() != 0u32 }
    }

    fn set_interrupt_configuration(&mut self, interrupt_configuration: InterruptConfiguration) {
        critical_section::with(|_| unsafe {
            // EDGE_SEL overrides ICR for either edge.
            if interrupt_configuration == InterruptConfiguration::EitherEdge {
                ral::modify_reg!(ral::gpio, self.register_block(), EDGE_SEL, |edge_sel| {
                    edge_sel | self.mask()
                });
                return;
            }

            ral::modify_reg!(ral::gpio, self.register_block(), EDGE_SEL, |edge_sel| {
                edge_sel & !self.mask()
            });

            // Discriminants match the two ICR bits per pin.
            let icr = interrupt_configuration as u32;
            let offset = <P as Pin>::Offset::USIZE;
            let shift = (offset % 16) * 2;
            let icr_modify = |reg| reg & !(0b11 << shift) | (icr << shift);
            if offset < 16 {
                ral::modify_reg!(ral::gpio, self.register_block(), ICR1, icr_modify);
            } else {
                ral::modify_reg!(ral::gpio, self.register_block(), ICR2, icr_modify);
            }
        })
    }

    fn is_interrupt_status(&self) -> bool {
        unsafe { ral::read_reg!(ral::gpio, self.register_block(), ISR) & self.mask() != 0u32 }
    }

    fn clear_interrupt_status(&mut self) {
        // ISR is write one to clear.
        unsafe { ral::write_reg!(ral::gpio, self.register_block(), ISR, self.mask()) }
    }
}
