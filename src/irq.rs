//! Binding encoders to interrupt vectors.
//!
//! Interrupt vectors are free functions, so they can't capture a tracker. Instead
//! each vector gets a `static` [`Dispatcher`] that the handlers are registered in,
//! and the vector just calls `dispatch`.
//!
//! ```ignore
//! static GPIO2_LOW: Dispatcher<2> = Dispatcher::new();
//!
//! #[cortex_m_rt::interrupt]
//! fn GPIO2_Combined_0_15() {
//!     GPIO2_LOW.dispatch();
//! }
//! ```

use arrayvec::{ArrayVec, CapacityError};
use critical_section::CriticalSection;

use crate::lock::Lock;

/// Something that reacts to a pin change interrupt.
pub trait EdgeHandler: Sync {
    /// Handle an edge. Returns the step it resulted in.
    fn on_edge(&self, cs: CriticalSection<'_>) -> i8;
}

pub type Handler = &'static dyn EdgeHandler;

/// The handlers sharing one interrupt vector. `N` is how many encoders can share it,
/// usually bounded by how many interrupt capable pins the vector serves.
pub struct Dispatcher<const N: usize> {
    handlers: Lock<ArrayVec<Handler, N>>,
}

impl<const N: usize> Dispatcher<N> {
    pub const fn new() -> Self {
        Dispatcher {
            handlers: Lock::new(ArrayVec::new_const()),
        }
    }

    /// Register a handler. Registering the same handler again does nothing.
    pub fn register(&self, handler: Handler) -> Result<(), CapacityError<Handler>> {
        self.handlers.with(|handlers| -> Result<(), CapacityError<Handler>> {
            if handlers.iter().any(|h| same(*h, handler)) {
                debug!("handler already registered");
                return Ok(());
            }

            handlers.try_push(handler)?;
            info!("registered handler {}/{}", handlers.len(), N);

            Ok(())
        })
    }

    /// Run all handlers. Call this from the interrupt vector.
    pub fn dispatch(&self) {
        critical_section::with(|cs| self.dispatch_in(cs));
    }

    pub fn dispatch_in(&self, cs: CriticalSection<'_>) {
        let handlers = self.handlers.get(cs);
        for h in handlers.iter() {
            h.on_edge(cs);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.with(|h| h.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn same(a: Handler, b: Handler) -> bool {
    // Compare data pointers only, vtables may be duplicated across codegen units.
    a as *const dyn EdgeHandler as *const u8 == b as *const dyn EdgeHandler as *const u8
}
