//! One-shot readiness gate between the two execution contexts.

use core::cell::UnsafeCell;
use core::mem::MaybeUninit;

use portable_atomic::{AtomicU8, Ordering};

const EMPTY: u8 = 0;
const PUBLISHING: u8 = 1;
const READY: u8 = 2;

/// A one-shot publish cell with acquire/release ordering.
///
/// Bootstrap publishes the shared runtime through this gate as its last
/// action; the secondary context spins on [`wait`](ReadyGate::wait)
/// before touching any shared state. The release store on publish and
/// the acquire load on the spinning reader form the single
/// happens-before edge between the two contexts; everything else shared
/// between them is deliberately unsynchronized.
///
/// The gate is monotonic: once set it never becomes unset, and the
/// published value is never replaced.
pub struct ReadyGate<T> {
    state: AtomicU8,
    slot: UnsafeCell<MaybeUninit<T>>,
}

// The slot is written exactly once, before the READY release store, and
// only read after an acquire load observes READY.
unsafe impl<T: Send + Sync> Sync for ReadyGate<T> {}

impl<T> ReadyGate<T> {
    /// Create an unset gate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(EMPTY),
            slot: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    /// Publish the value and set the gate.
    ///
    /// Must be called at most once, after all initialization the
    /// published value refers to is complete.
    ///
    /// # Panics
    ///
    /// Panics on a second publish attempt.
    pub fn publish(&self, value: T) -> &T {
        if self
            .state
            .compare_exchange(EMPTY, PUBLISHING, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            panic!("readiness gate published twice");
        }
        // SAFETY: the EMPTY -> PUBLISHING transition succeeds for exactly
        // one caller, which has exclusive access to the slot here.
        let value = unsafe { (*self.slot.get()).write(value) };
        self.state.store(READY, Ordering::Release);
        value
    }

    /// Spin until the gate is set, then return the published value.
    pub fn wait(&self) -> &T {
        while self.state.load(Ordering::Acquire) != READY {
            core::hint::spin_loop();
        }
        // SAFETY: READY is stored with release ordering after the slot is
        // written, never cleared, and the slot is never written again.
        unsafe { (*self.slot.get()).assume_init_ref() }
    }

    /// Return the published value if the gate is set.
    #[must_use]
    pub fn try_get(&self) -> Option<&T> {
        if self.state.load(Ordering::Acquire) == READY {
            // SAFETY: as in `wait`.
            Some(unsafe { (*self.slot.get()).assume_init_ref() })
        } else {
            None
        }
    }

    /// Check whether the gate is set without touching the value.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state.load(Ordering::Acquire) == READY
    }
}

impl<T> Default for ReadyGate<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for ReadyGate<T> {
    fn drop(&mut self) {
        if *self.state.get_mut() == READY {
            // SAFETY: READY means the slot was initialized, and &mut self
            // gives exclusive access.
            unsafe { self.slot.get_mut().assume_init_drop() };
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::sync::Arc;
    use std::thread;
    use std::vec::Vec;

    use super::*;

    #[test]
    fn test_unset_until_published() {
        let gate: ReadyGate<u32> = ReadyGate::new();
        assert!(!gate.is_ready());
        assert!(gate.try_get().is_none());

        gate.publish(7);
        assert!(gate.is_ready());
        assert_eq!(gate.try_get(), Some(&7));
        assert_eq!(*gate.wait(), 7);

        // Monotonic: still set on every subsequent observation.
        assert!(gate.is_ready());
    }

    #[test]
    #[should_panic(expected = "published twice")]
    fn test_second_publish_panics() {
        let gate: ReadyGate<u32> = ReadyGate::new();
        gate.publish(1);
        gate.publish(2);
    }

    #[test]
    fn test_waiters_observe_published_value() {
        let gate: Arc<ReadyGate<[u32; 16]>> = Arc::new(ReadyGate::new());

        let waiters: Vec<_> = (0..4)
            .map(|_| {
                let gate = Arc::clone(&gate);
                thread::spawn(move || *gate.wait())
            })
            .collect();

        // Publish after the waiters are already spinning.
        thread::sleep(std::time::Duration::from_millis(10));
        gate.publish([0xAB; 16]);

        for waiter in waiters {
            assert_eq!(waiter.join().unwrap(), [0xAB; 16]);
        }
    }
}
