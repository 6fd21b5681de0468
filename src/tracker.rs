use embedded_hal::digital::v2::InputPin;

use crate::config::Config;
use crate::encoder::{pack, Decoder};
use crate::error::Error;
use crate::inter::{self, Interrupt};

/// Keeps track of the position of a knob hooked up to two interrupt capable inputs.
///
/// Pins come in already configured as inputs (with pull-ups where the knob
/// needs them). `init` arms them to interrupt on any change, and the interrupt
/// handler calls `update`.
#[derive(Debug)]
pub struct Tracker<A, B> {
    pin_a: A,
    pin_b: B,
    config: Config,
    decoder: Decoder,
    position: i32,
    incr: i32,
    initialized: bool,
}

impl<A, B, E> Tracker<A, B>
where
    A: InputPin<Error = E> + Interrupt,
    B: InputPin<Error = E> + Interrupt,
{
    pub fn new(pin_a: A, pin_b: B) -> Self {
        Self::with_config(pin_a, pin_b, Config::default())
    }

    pub fn with_config(pin_a: A, pin_b: B, config: Config) -> Self {
        Tracker {
            pin_a,
            pin_b,
            config,
            decoder: Decoder::new(config.mode),
            position: 0,
            incr: 0,
            initialized: false,
        }
    }

    /// Arm both pins for change interrupts and take the current pin levels as the
    /// starting state.
    ///
    /// Calling this again re-arms the pins and re-samples. Positions are kept.
    pub fn init(&mut self) -> Result<(), Error<E>> {
        inter::arm(&mut self.pin_a);
        inter::arm(&mut self.pin_b);

        let current = self.sample()?;
        self.decoder.reset(current);

        if self.initialized {
            debug!("encoder re-armed in state {:02b}", current);
        } else {
            info!(
                "encoder armed in state {:02b}, mode {:?}",
                current, self.config.mode
            );
        }
        self.initialized = true;

        Ok(())
    }

    /// Decode one pin change. This is what the interrupt handler runs.
    ///
    /// Returns the step applied to the position, 0 for bounce.
    pub fn update(&mut self) -> Result<i8, Error<E>> {
        self.check()?;

        inter::acknowledge(&mut self.pin_a);
        inter::acknowledge(&mut self.pin_b);

        let current = self.sample()?;
        let mut step = self.decoder.step(current);

        if self.config.reversed {
            step = -step;
        }

        if step != 0 {
            self.position = self.position.wrapping_add(step as i32);
            self.incr = self.incr.wrapping_add(step as i32);
            trace!("encoder step {} pos {}", step, self.position);
        }

        Ok(step)
    }

    pub fn pos(&self) -> Result<i32, Error<E>> {
        self.check()?;
        Ok(self.position)
    }

    /// Overwrite the absolute position. A pending increment is left as is.
    pub fn set_pos(&mut self, pos: i32) -> Result<(), Error<E>> {
        self.check()?;
        self.position = pos;
        Ok(())
    }

    /// Net movement since the last call. Reading it resets it to 0.
    pub fn incr_pos(&mut self) -> Result<i32, Error<E>> {
        self.check()?;
        Ok(core::mem::replace(&mut self.incr, 0))
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Disable the pin interrupts, drop anything pending and hand back the pins.
    pub fn release(mut self) -> (A, B) {
        self.pin_a.set_interrupt_enable(false);
        self.pin_b.set_interrupt_enable(false);
        self.pin_a.clear_interrupt_status();
        self.pin_b.clear_interrupt_status();
        (self.pin_a, self.pin_b)
    }

    fn sample(&self) -> Result<u8, Error<E>> {
        let a = self.pin_a.is_high().map_err(Error::Pin)?;
        let b = self.pin_b.is_high().map_err(Error::Pin)?;
        Ok(pack(a, b))
    }

    fn check(&self) -> Result<(), Error<E>> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::Uninitialized)
        }
    }
}
