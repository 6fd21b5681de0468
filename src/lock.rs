use core::cell::RefCell;
use core::cell::RefMut;
use core::fmt;
use core::ops::Deref;
use core::ops::DerefMut;

use critical_section::CriticalSection;
use critical_section::Mutex;

/// A "lock" based on critical sections
///
/// The data is only reachable inside a critical section, which on a single core
/// means neither the interrupt handler nor the main loop can observe a half
/// finished update of the other. `new` is const, so locks can be `static` and
/// shared between an ISR and the main loop.
pub struct Lock<T> {
    inner: Mutex<RefCell<T>>,
}

pub struct LockGuard<'a, T> {
    data: RefMut<'a, T>,
}

impl<T> Lock<T> {
    /// Create a new instance of a lock.
    pub const fn new(t: T) -> Self {
        Lock {
            inner: Mutex::new(RefCell::new(t)),
        }
    }

    /// Get the data for the duration of the critical section.
    ///
    /// # Panics
    ///
    /// If the data is already borrowed in the same critical section.
    pub fn get<'cs>(&'cs self, cs: CriticalSection<'cs>) -> LockGuard<'cs, T> {
        LockGuard {
            data: self.inner.borrow(cs).borrow_mut(),
        }
    }

    /// Enter a critical section and run `f` on the data.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        critical_section::with(|cs| {
            let mut guard = self.get(cs);
            f(&mut *guard)
        })
    }
}

impl<'a, T> Deref for LockGuard<'a, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<'a, T> DerefMut for LockGuard<'a, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl<T: fmt::Debug> fmt::Debug for LockGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: fmt::Display> fmt::Display for LockGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt(f)
    }
}
