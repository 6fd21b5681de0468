//! Simulated knob for tests.

use core::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use embedded_hal::digital::v2::InputPin;

use crate::encoder::pack;
use crate::inter::{Interrupt, InterruptConfiguration};

#[derive(Debug, Default)]
struct Line {
    level: AtomicBool,
    status: AtomicBool,
    enabled: AtomicBool,
}

impl Line {
    /// Changes only latch an interrupt while it is enabled.
    fn drive(&self, level: bool) {
        let changed = self.level.swap(level, Ordering::SeqCst) != level;
        if changed && self.enabled.load(Ordering::SeqCst) {
            self.status.store(true, Ordering::SeqCst);
        }
    }
}

/// Two wires of a knob resting in the `11` detent.
pub struct Knob {
    a: Arc<Line>,
    b: Arc<Line>,
}

impl Default for Knob {
    fn default() -> Self {
        Self::new()
    }
}

impl Knob {
    pub fn new() -> Self {
        let knob = Knob {
            a: Arc::new(Line::default()),
            b: Arc::new(Line::default()),
        };
        knob.a.level.store(true, Ordering::SeqCst);
        knob.b.level.store(true, Ordering::SeqCst);
        knob
    }

    pub fn pins(&self) -> (FakePin, FakePin) {
        (FakePin::new(self.a.clone()), FakePin::new(self.b.clone()))
    }

    /// Either wire has an interrupt pending.
    pub fn pending(&self) -> bool {
        self.a.status.load(Ordering::SeqCst) || self.b.status.load(Ordering::SeqCst)
    }

    /// Either wire has its interrupt enabled.
    pub fn armed(&self) -> bool {
        self.a.enabled.load(Ordering::SeqCst) || self.b.enabled.load(Ordering::SeqCst)
    }

    pub fn set(&self, a: bool, b: bool) {
        self.a.drive(a);
        self.b.drive(b);
    }

    fn state(&self) -> u8 {
        pack(
            self.a.level.load(Ordering::SeqCst),
            self.b.level.load(Ordering::SeqCst),
        )
    }

    fn go(&self, next: u8) {
        self.set(next & 0b10 != 0, next & 0b01 != 0);
    }

    /// One clockwise transition.
    pub fn cw(&self) {
        let next = match self.state() {
            0b11 => 0b01,
            0b01 => 0b00,
            0b00 => 0b10,
            _ => 0b11,
        };
        self.go(next);
    }

    /// One counter clockwise transition.
    pub fn ccw(&self) {
        let next = match self.state() {
            0b11 => 0b10,
            0b10 => 0b00,
            0b00 => 0b01,
            _ => 0b11,
        };
        self.go(next);
    }
}

#[derive(Debug)]
pub struct FakePin {
    line: Arc<Line>,
    configuration: Option<InterruptConfiguration>,
}

impl FakePin {
    fn new(line: Arc<Line>) -> Self {
        FakePin {
            line,
            configuration: None,
        }
    }

    /// Pretend an interrupt is pending.
    pub fn raise(&self) {
        self.line.status.store(true, Ordering::SeqCst);
    }

    pub fn configuration(&self) -> Option<InterruptConfiguration> {
        self.configuration
    }
}

impl InputPin for FakePin {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.line.level.load(Ordering::SeqCst))
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.line.level.load(Ordering::SeqCst))
    }
}

impl Interrupt for FakePin {
    fn set_interrupt_enable(&mut self, enable: bool) {
        self.line.enabled.store(enable, Ordering::SeqCst);
    }

    fn is_interrupt_enabled(&self) -> bool {
        self.line.enabled.load(Ordering::SeqCst)
    }

    fn set_interrupt_configuration(&mut self, interrupt_configuration: InterruptConfiguration) {
        self.configuration = Some(interrupt_configuration);
    }

    fn is_interrupt_status(&self) -> bool {
        self.line.status.load(Ordering::SeqCst)
    }

    fn clear_interrupt_status(&mut self) {
        self.line.status.store(false, Ordering::SeqCst);
    }
}
