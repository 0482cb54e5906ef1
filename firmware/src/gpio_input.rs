//! GPIO matrix input source.

use crossbox_core::{Button, InputError, InputSource, InputSnapshot, PinAssignment};
use embassy_rp::gpio::Input;

/// Direct-wired button input: one GPIO per button, pulled up, active
/// low.
pub struct GpioButtonInput {
    inputs: [Input<'static>; Button::COUNT],
    map: &'static [PinAssignment; Button::COUNT],
}

impl GpioButtonInput {
    /// `inputs` must be constructed in the same order as `map`.
    #[must_use]
    pub fn new(
        inputs: [Input<'static>; Button::COUNT],
        map: &'static [PinAssignment; Button::COUNT],
    ) -> Self {
        Self { inputs, map }
    }
}

impl InputSource for GpioButtonInput {
    async fn refresh(&mut self, snapshot: &InputSnapshot) -> Result<(), InputError> {
        for (input, assignment) in self.inputs.iter().zip(self.map) {
            snapshot.set(assignment.button, input.is_low());
        }
        Ok(())
    }
}
