//! Position tracking for a rotary encoder on two interrupt capable pins.
//!
//! [`Tracker`] owns the pins and decodes every pin change through a fixed
//! transition table, so contact bounce never moves the position.
//! [`Shared`] puts a tracker behind a critical section so it can live in a
//! `static` and be updated from the interrupt handler while the main loop reads
//! it, and [`Dispatcher`] connects it to an interrupt vector.

#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;

mod config;
mod encoder;
mod error;
mod inter;
mod irq;
mod lock;
mod shared;
mod tracker;

#[cfg(test)]
mod testing;

pub use config::{Config, StepMode};
pub use encoder::{pack, transition, Decoder};
pub use error::Error;
pub use inter::{Interrupt, InterruptConfiguration};
pub use irq::{Dispatcher, EdgeHandler, Handler};
pub use lock::{Lock, LockGuard};
pub use shared::Shared;
pub use tracker::Tracker;
