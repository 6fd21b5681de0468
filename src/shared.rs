use core::fmt;

use critical_section::CriticalSection;
use embedded_hal::digital::v2::InputPin;

use crate::error::Error;
use crate::inter::Interrupt;
use crate::irq::EdgeHandler;
use crate::lock::Lock;
use crate::tracker::Tracker;

/// A [`Tracker`] shared between the interrupt handler and the main loop.
///
/// Every access runs in its own critical section, so reads from the main loop
/// never see a half applied step.
///
/// ```ignore
/// static KNOB: Shared<PinA, PinB> = Shared::new();
///
/// KNOB.init(Tracker::new(pin_a, pin_b))?;
/// GPIO_VECTOR.register(&KNOB)?;
///
/// let moved = KNOB.incr_pos()?;
/// ```
pub struct Shared<A, B> {
    tracker: Lock<Option<Tracker<A, B>>>,
}

impl<A, B> Shared<A, B> {
    pub const fn new() -> Self {
        Shared {
            tracker: Lock::new(None),
        }
    }
}

impl<A, B, E> Shared<A, B>
where
    A: InputPin<Error = E> + Interrupt,
    B: InputPin<Error = E> + Interrupt,
{
    /// Initialize `tracker` and install it. An already installed tracker is replaced.
    pub fn init(&self, mut tracker: Tracker<A, B>) -> Result<(), Error<E>> {
        critical_section::with(|cs| -> Result<(), Error<E>> {
            tracker.init()?;

            let mut slot = self.tracker.get(cs);
            if let Some(old) = slot.take() {
                warn!("replacing installed encoder");
                // The old pins would otherwise keep firing the shared vector.
                old.release();
            }
            *slot = Some(tracker);

            Ok(())
        })
    }

    /// Re-arm the installed tracker.
    pub fn reinit(&self) -> Result<(), Error<E>> {
        self.installed(|t| t.init())
    }

    fn installed<R>(
        &self,
        f: impl FnOnce(&mut Tracker<A, B>) -> Result<R, Error<E>>,
    ) -> Result<R, Error<E>> {
        self.tracker.with(|t| match t.as_mut() {
            Some(t) => f(t),
            None => Err(Error::Uninitialized),
        })
    }

    /// Uninstall the tracker, handing back the pins.
    pub fn take(&self) -> Option<(A, B)> {
        self.tracker.with(|t| t.take()).map(Tracker::release)
    }

    pub fn update(&self) -> Result<i8, Error<E>> {
        critical_section::with(|cs| self.update_in(cs))
    }

    /// Like `update`, for callers that already are in a critical section.
    pub fn update_in(&self, cs: CriticalSection<'_>) -> Result<i8, Error<E>> {
        match self.tracker.get(cs).as_mut() {
            Some(t) => t.update(),
            None => Err(Error::Uninitialized),
        }
    }

    pub fn pos(&self) -> Result<i32, Error<E>> {
        self.installed(|t| t.pos())
    }

    pub fn set_pos(&self, pos: i32) -> Result<(), Error<E>> {
        self.installed(|t| t.set_pos(pos))
    }

    /// Net movement since the last call, consumed by reading.
    pub fn incr_pos(&self) -> Result<i32, Error<E>> {
        self.installed(|t| t.incr_pos())
    }
}

impl<A, B, E> EdgeHandler for Shared<A, B>
where
    A: InputPin<Error = E> + Interrupt + Send,
    B: InputPin<Error = E> + Interrupt + Send,
    E: fmt::Debug,
{
    fn on_edge(&self, cs: CriticalSection<'_>) -> i8 {
        match self.update_in(cs) {
            Ok(step) => step,
            Err(e) => {
                warn!("encoder update failed: {}", e);
                0
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{FakePin, Knob};

    #[test]
    fn uninstalled() {
        let shared: Shared<FakePin, FakePin> = Shared::new();
        assert_eq!(shared.pos(), Err(Error::Uninitialized));
        assert_eq!(shared.incr_pos(), Err(Error::Uninitialized));
        assert_eq!(shared.update(), Err(Error::Uninitialized));
        assert_eq!(shared.reinit(), Err(Error::Uninitialized));
        assert!(shared.take().is_none());
    }

    #[test]
    fn tracks_through_lock() {
        let knob = Knob::new();
        let (a, b) = knob.pins();
        let shared = Shared::new();
        shared.init(Tracker::new(a, b)).unwrap();

        for _ in 0..4 {
            knob.cw();
            shared.update().unwrap();
        }
        assert_eq!(shared.pos(), Ok(4));
        assert_eq!(shared.incr_pos(), Ok(4));
        assert_eq!(shared.incr_pos(), Ok(0));

        shared.set_pos(-10).unwrap();
        assert_eq!(shared.pos(), Ok(-10));
    }

    #[test]
    fn reinit_is_idempotent() {
        let knob = Knob::new();
        let (a, b) = knob.pins();
        let shared = Shared::new();
        shared.init(Tracker::new(a, b)).unwrap();
        knob.ccw();
        shared.update().unwrap();
        shared.reinit().unwrap();
        shared.reinit().unwrap();
        assert_eq!(shared.pos(), Ok(-1));
        assert_eq!(shared.incr_pos(), Ok(-1));
    }

    #[test]
    fn take_releases_pins() {
        let knob = Knob::new();
        let (a, b) = knob.pins();
        let shared = Shared::new();
        shared.init(Tracker::new(a, b)).unwrap();
        let (a, _b) = shared.take().unwrap();
        assert!(!a.is_interrupt_enabled());
        assert_eq!(shared.pos(), Err(Error::Uninitialized));
    }

    #[test]
    fn replacing_disarms_old_pins() {
        let old = Knob::new();
        let new = Knob::new();
        let shared = Shared::new();

        let (a, b) = old.pins();
        shared.init(Tracker::new(a, b)).unwrap();
        old.cw();
        assert!(old.pending());

        let (a, b) = new.pins();
        shared.init(Tracker::new(a, b)).unwrap();
        assert!(!old.armed());
        assert!(!old.pending());

        old.cw();
        shared.update().unwrap();
        assert!(!old.pending());
        assert_eq!(shared.pos(), Ok(0));

        new.cw();
        shared.update().unwrap();
        assert!(!new.pending());
        assert_eq!(shared.pos(), Ok(1));
    }

    #[test]
    fn on_edge_swallows_errors() {
        let shared: Shared<FakePin, FakePin> = Shared::new();
        let step = critical_section::with(|cs| shared.on_edge(cs));
        assert_eq!(step, 0);
    }
}
