//! Pin change interrupts.
//!
//! embedded-hal has no generic interface for GPIO interrupts, so the encoder pins
//! must implement this next to `InputPin`. The board crate wires the actual
//! interrupt vector to a [`Dispatcher`](crate::Dispatcher).

pub trait Interrupt {
    fn set_interrupt_enable(&mut self, enable: bool);
    fn is_interrupt_enabled(&self) -> bool;
    fn set_interrupt_configuration(&mut self, interrupt_configuration: InterruptConfiguration);
    fn is_interrupt_status(&self) -> bool;
    fn clear_interrupt_status(&mut self);
}

/// GPIO input interrupt configurations.
///
/// These configurations do not take effect until
/// GPIO input interrupts are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum InterruptConfiguration {
    LowLevel = 0,
    HighLevel = 1,
    RisingEdge = 2,
    FallingEdge = 3,
    EitherEdge = 4,
}

/// Acknowledge a pending interrupt, returns whether there was one.
pub fn acknowledge<P: Interrupt>(pin: &mut P) -> bool {
    if pin.is_interrupt_status() {
        pin.clear_interrupt_status();
        true
    } else {
        false
    }
}

/// Arm `pin` to interrupt on any level change.
pub fn arm<P: Interrupt>(pin: &mut P) {
    pin.clear_interrupt_status();
    pin.set_interrupt_configuration(InterruptConfiguration::EitherEdge);
    pin.set_interrupt_enable(true);
}
