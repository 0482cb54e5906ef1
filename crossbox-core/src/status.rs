//! The status loop run on the secondary context.

use crate::buttons::Buttons;
use crate::display::DisplayState;
use crate::input::InputSource;
use crate::snapshot::InputSnapshot;

/// One frame of status output handed to the rendering surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusView<'a> {
    /// Composed status line (backend label + mode label).
    pub line: &'a str,
    /// The captured frame for the per-button indicators.
    pub frame: Buttons,
}

/// A rendering surface for the status view.
///
/// `draw` renders one complete frame; it must not block on report
/// transmission. Drawing the same view twice must produce the same
/// visible frame.
pub trait StatusSurface {
    type Error;

    fn draw(&mut self, view: &StatusView<'_>) -> Result<(), Self::Error>;
}

/// Refreshes the auxiliary input and redraws the status surface.
///
/// Constructed only after the readiness gate is observed set, so the
/// snapshot reference and initial display state are safe to read. The
/// captured frame may tear relative to the report loop's last-sent
/// report; that is accepted, rendering is best-effort and self-corrects
/// on the next cycle.
pub struct StatusLoop<'a, A, S> {
    aux: Option<A>,
    surface: S,
    snapshot: &'a InputSnapshot,
    display: DisplayState,
}

impl<'a, A, S> StatusLoop<'a, A, S>
where
    A: InputSource,
    S: StatusSurface,
{
    /// Create a status loop over the published runtime state.
    ///
    /// `aux` is `None` on boards without the auxiliary peripheral.
    pub fn new(
        aux: Option<A>,
        surface: S,
        snapshot: &'a InputSnapshot,
        display: DisplayState,
    ) -> Self {
        Self {
            aux,
            surface,
            snapshot,
            display,
        }
    }

    /// Run forever.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.cycle().await;
        }
    }

    /// One cycle: auxiliary refresh, label latch, redraw.
    pub async fn cycle(&mut self) -> Result<(), S::Error> {
        if let Some(aux) = self.aux.as_mut() {
            // Auxiliary input is cosmetic-adjacent; a failed read just
            // leaves the previous flags in place.
            let _ = aux.refresh(self.snapshot).await;
        }

        let frame = self.snapshot.capture();
        self.display.update(frame);
        let line = self.display.status_line();
        self.surface.draw(&StatusView { line: &line, frame })
    }

    /// The current display state.
    pub fn display(&self) -> &DisplayState {
        &self.display
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::future::Future;
    use core::pin::Pin;
    use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
    use std::string::{String, ToString};
    use std::vec::Vec;

    use super::*;
    use crate::buttons::Button;
    use crate::display::ModeLabel;
    use crate::input::InputError;

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

    /// Presses one button on every refresh, like a held Nunchuk button.
    struct MockAux {
        button: Button,
    }

    impl InputSource for MockAux {
        async fn refresh(&mut self, snapshot: &InputSnapshot) -> Result<(), InputError> {
            snapshot.set(self.button, true);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        frames: Vec<(String, Buttons)>,
    }

    impl StatusSurface for RecordingSurface {
        type Error = ();

        fn draw(&mut self, view: &StatusView<'_>) -> Result<(), ()> {
            self.frames.push((view.line.to_string(), view.frame));
            Ok(())
        }
    }

    #[test]
    fn test_render_is_idempotent_for_unchanged_snapshot() {
        let snapshot = InputSnapshot::new();
        snapshot.set(Button::A, true);

        let mut status: StatusLoop<'_, MockAux, _> = StatusLoop::new(
            None,
            RecordingSurface::default(),
            &snapshot,
            DisplayState::new(),
        );

        block_on(status.cycle()).unwrap();
        block_on(status.cycle()).unwrap();

        let frames = &status.surface.frames;
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], frames[1]);
    }

    #[test]
    fn test_aux_refresh_lands_in_the_shared_snapshot() {
        let snapshot = InputSnapshot::new();

        let mut status = StatusLoop::new(
            Some(MockAux {
                button: Button::CUp,
            }),
            RecordingSurface::default(),
            &snapshot,
            DisplayState::new(),
        );

        block_on(status.cycle()).unwrap();

        assert!(snapshot.get(Button::CUp));
        assert!(status.surface.frames[0].1.contains(Button::CUp));
    }

    #[test]
    fn test_mode_label_latches_across_cycles() {
        let snapshot = InputSnapshot::new();
        for button in [Button::ModX, Button::Start, Button::Down] {
            snapshot.set(button, true);
        }

        let mut status: StatusLoop<'_, MockAux, _> = StatusLoop::new(
            None,
            RecordingSurface::default(),
            &snapshot,
            DisplayState::new(),
        );

        block_on(status.cycle()).unwrap();
        assert_eq!(status.display().mode, Some(ModeLabel::Ultimate));

        // Combination released: the latch keeps the label.
        for button in [Button::ModX, Button::Start, Button::Down] {
            snapshot.set(button, false);
        }
        block_on(status.cycle()).unwrap();
        assert_eq!(status.display().mode, Some(ModeLabel::Ultimate));
        assert!(status.surface.frames[1].0.ends_with("ULT"));
    }
}
