//! SSD1306 status surface.
//!
//! Renders the status line plus the per-button indicator circles of the
//! configured layout. Owned exclusively by the secondary context.

use crossbox_core::{Indicator, Region, StatusSurface, StatusView};
use crossbox_core::layout;
use display_interface::DisplayError;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};
use embedded_graphics::text::Text;
use embedded_hal::i2c::I2c;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

pub struct OledStatus<I2C> {
    display: Display<I2C>,
    regions: [&'static [Indicator]; 3],
}

impl<I2C: I2c> OledStatus<I2C> {
    /// Bring up the display and resolve the configured arrangements.
    ///
    /// Unknown arrangement names fall back to the region's default.
    pub fn new(i2c: I2C, chosen: &[(Region, &'static str); 3]) -> Result<Self, DisplayError> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display.init()?;

        let mut regions = [layout::default_arrangement(Region::LeftHand); 3];
        for (slot, &(region, name)) in regions.iter_mut().zip(chosen) {
            *slot = layout::arrangement(region, name)
                .unwrap_or_else(|| layout::default_arrangement(region));
        }

        Ok(Self { display, regions })
    }
}

impl<I2C: I2c> StatusSurface for OledStatus<I2C> {
    type Error = DisplayError;

    fn draw(&mut self, view: &StatusView<'_>) -> Result<(), DisplayError> {
        self.display.clear_buffer();

        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        Text::new(view.line, Point::new(0, 7), style).draw(&mut self.display)?;

        for indicator in self.regions.iter().flat_map(|region| region.iter()) {
            let pressed = view.frame.contains(indicator.button);
            let style = if pressed {
                PrimitiveStyle::with_fill(BinaryColor::On)
            } else {
                PrimitiveStyle::with_stroke(BinaryColor::On, 1)
            };
            Circle::with_center(
                Point::new(i32::from(indicator.x), i32::from(indicator.y)),
                u32::from(indicator.radius) * 2,
            )
            .into_styled(style)
            .draw(&mut self.display)?;
        }

        self.display.flush()
    }
}
