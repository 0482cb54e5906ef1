//! The latency-critical report loop run on the primary context.

use crate::backend::{BackendSet, CommunicationBackend, ReportError};
use crate::mode::{KeyboardMode, ModeSwitch};

/// Drives mode switching and report transmission for a backend set.
///
/// Backend identity never changes after bootstrap; only in-place state
/// (active mode, snapshot contents) does. A failing backend does not
/// stop the cycle; the first error is reported to the caller once all
/// backends have been serviced.
pub struct ReportLoop<B, S, K> {
    backends: BackendSet<B>,
    switcher: S,
    keyboard: Option<K>,
}

impl<B, S, K> ReportLoop<B, S, K>
where
    B: CommunicationBackend,
    S: ModeSwitch<B, K>,
    K: KeyboardMode,
{
    /// Create a loop over a freshly constructed backend set.
    pub fn new(backends: BackendSet<B>, switcher: S) -> Self {
        Self {
            backends,
            switcher,
            keyboard: None,
        }
    }

    /// Run forever. Never returns under normal operation; the only way
    /// out is power-down or the firmware-update reset taken at boot.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.cycle().await;
        }
    }

    /// One cycle: evaluate mode switching, transmit on every backend in
    /// set order, then the extra keyboard report when one is attached.
    pub async fn cycle(&mut self) -> Result<(), ReportError> {
        self.switcher
            .evaluate(self.backends.primary_mut(), &mut self.keyboard);

        let mut result = Ok(());
        for backend in self.backends.iter_mut() {
            if let Err(e) = backend.send_report().await {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }

        if let Some(keyboard) = self.keyboard.as_mut() {
            let frame = self.backends.primary().snapshot().capture();
            if let Err(e) = keyboard.send_report(frame).await {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }

        result
    }

    /// The backend set being driven.
    pub fn backends(&self) -> &BackendSet<B> {
        &self.backends
    }

    /// Whether a keyboard mode is currently attached.
    #[must_use]
    pub fn has_keyboard(&self) -> bool {
        self.keyboard.is_some()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::future::Future;
    use core::pin::Pin;
    use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::vec::Vec;

    use super::*;
    use crate::buttons::{Button, Buttons};
    use crate::mode::{ControlOutput, GameMode};
    use crate::snapshot::InputSnapshot;

    // Helper to run a future to completion (simple blocking executor)
    fn block_on<F: Future>(mut f: F) -> F::Output {
        fn noop_raw_waker() -> RawWaker {
            fn noop(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                noop_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
            RawWaker::new(core::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
        let mut cx = Context::from_waker(&waker);

        // SAFETY: We don't move f after pinning
        let mut f = unsafe { Pin::new_unchecked(&mut f) };

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {
                    panic!("Mock future returned Pending unexpectedly");
                }
            }
        }
    }

    struct NullMode;

    impl GameMode for NullMode {
        fn map(&mut self, _frame: Buttons, _out: &mut ControlOutput) {}
    }

    struct MockBackend {
        name: &'static str,
        snapshot: &'static InputSnapshot,
        sends: Arc<Mutex<Vec<&'static str>>>,
        fail_with: Option<ReportError>,
    }

    impl CommunicationBackend for MockBackend {
        type Mode = NullMode;

        fn snapshot(&self) -> &InputSnapshot {
            self.snapshot
        }

        fn set_mode(&mut self, _mode: NullMode) {}

        async fn send_report(&mut self) -> Result<(), ReportError> {
            self.sends.lock().unwrap().push(self.name);
            match self.fail_with {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }
    }

    struct MockKeyboard {
        sends: Arc<Mutex<Vec<Buttons>>>,
    }

    impl KeyboardMode for MockKeyboard {
        async fn send_report(&mut self, frame: Buttons) -> Result<(), ReportError> {
            self.sends.lock().unwrap().push(frame);
            Ok(())
        }
    }

    struct NoSwitch;

    impl ModeSwitch<MockBackend, MockKeyboard> for NoSwitch {
        fn evaluate(&mut self, _primary: &mut MockBackend, _keyboard: &mut Option<MockKeyboard>) {}
    }

    /// Attaches a keyboard on the first evaluation.
    struct AttachKeyboard {
        sends: Arc<Mutex<Vec<Buttons>>>,
    }

    impl ModeSwitch<MockBackend, MockKeyboard> for AttachKeyboard {
        fn evaluate(&mut self, _primary: &mut MockBackend, keyboard: &mut Option<MockKeyboard>) {
            if keyboard.is_none() {
                *keyboard = Some(MockKeyboard {
                    sends: Arc::clone(&self.sends),
                });
            }
        }
    }

    fn backend(
        name: &'static str,
        snapshot: &'static InputSnapshot,
        sends: &Arc<Mutex<Vec<&'static str>>>,
    ) -> MockBackend {
        MockBackend {
            name,
            snapshot,
            sends: Arc::clone(sends),
            fail_with: None,
        }
    }

    #[test]
    fn test_cycle_services_backends_in_set_order() {
        static SNAPSHOT: InputSnapshot = InputSnapshot::new();
        let sends = Arc::new(Mutex::new(Vec::new()));

        let set = BackendSet::with_viewer(
            backend("primary", &SNAPSHOT, &sends),
            backend("viewer", &SNAPSHOT, &sends),
        );
        let mut report_loop: ReportLoop<_, _, MockKeyboard> = ReportLoop::new(set, NoSwitch);

        block_on(report_loop.cycle()).unwrap();
        block_on(report_loop.cycle()).unwrap();

        assert_eq!(
            *sends.lock().unwrap(),
            ["primary", "viewer", "primary", "viewer"]
        );
        assert!(!report_loop.has_keyboard());
    }

    #[test]
    fn test_backend_error_does_not_stop_the_cycle() {
        static SNAPSHOT: InputSnapshot = InputSnapshot::new();
        let sends = Arc::new(Mutex::new(Vec::new()));

        let mut primary = backend("primary", &SNAPSHOT, &sends);
        primary.fail_with = Some(ReportError::NotReady);
        let set = BackendSet::with_viewer(primary, backend("viewer", &SNAPSHOT, &sends));
        let mut report_loop: ReportLoop<_, _, MockKeyboard> = ReportLoop::new(set, NoSwitch);

        let result = block_on(report_loop.cycle());
        assert_eq!(result, Err(ReportError::NotReady));
        // The viewer was still serviced.
        assert_eq!(*sends.lock().unwrap(), ["primary", "viewer"]);
    }

    #[test]
    fn test_attached_keyboard_reports_primary_frame() {
        static SNAPSHOT: InputSnapshot = InputSnapshot::new();
        SNAPSHOT.set(Button::A, true);

        let sends = Arc::new(Mutex::new(Vec::new()));
        let kb_sends = Arc::new(Mutex::new(Vec::new()));

        let set = BackendSet::single(backend("primary", &SNAPSHOT, &sends));
        let mut report_loop = ReportLoop::new(
            set,
            AttachKeyboard {
                sends: Arc::clone(&kb_sends),
            },
        );

        block_on(report_loop.cycle()).unwrap();

        assert!(report_loop.has_keyboard());
        assert_eq!(
            *kb_sends.lock().unwrap(),
            [Buttons::NONE.with(Button::A)]
        );
    }
}
