//! Wii Nunchuk auxiliary input, polled from the secondary context over
//! the shared I2C bus.
//!
//! The Nunchuk contributes to the same live snapshot the report loop
//! reads; its stores race benignly with the GPIO matrix refresh, both
//! only ever writing their latest physical reading.

use crossbox_core::{Button, InputError, InputSnapshot, InputSource};
use embedded_hal::i2c::I2c;

const ADDR: u8 = 0x52;

/// Stick deflection treated as a held direction.
const STICK_HIGH: u8 = 192;
const STICK_LOW: u8 = 64;

/// Nunchuk input source.
///
/// Initializes lazily (unencrypted init sequence) so a controller
/// plugged in after boot starts working on the next refresh.
pub struct NunchukInput<I2C> {
    i2c: I2C,
    initialized: bool,
}

impl<I2C: I2c> NunchukInput<I2C> {
    #[must_use]
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            initialized: false,
        }
    }

    fn init(&mut self) -> Result<(), InputError> {
        self.i2c
            .write(ADDR, &[0xF0, 0x55])
            .map_err(|_| InputError::Disconnected)?;
        self.i2c
            .write(ADDR, &[0xFB, 0x00])
            .map_err(|_| InputError::Disconnected)?;
        self.initialized = true;
        Ok(())
    }

    fn read_frame(&mut self) -> Result<[u8; 6], InputError> {
        self.i2c.write(ADDR, &[0x00]).map_err(|_| {
            self.initialized = false;
            InputError::Io
        })?;
        let mut data = [0u8; 6];
        self.i2c.read(ADDR, &mut data).map_err(|_| {
            self.initialized = false;
            InputError::Io
        })?;
        // An unresponsive or just-attached device reads all-0xFF.
        if data == [0xFF; 6] {
            self.initialized = false;
            return Err(InputError::Decode);
        }
        Ok(data)
    }
}

impl<I2C: I2c> InputSource for NunchukInput<I2C> {
    async fn refresh(&mut self, snapshot: &InputSnapshot) -> Result<(), InputError> {
        if !self.initialized {
            self.init()?;
        }
        let data = self.read_frame()?;

        let stick_x = data[0];
        let stick_y = data[1];
        let z = data[5] & 0x01 == 0;
        let c = data[5] & 0x02 == 0;

        // Stick doubles the direction cluster, Z/C the primary attack
        // buttons.
        snapshot.set(Button::Left, stick_x < STICK_LOW);
        snapshot.set(Button::Right, stick_x > STICK_HIGH);
        snapshot.set(Button::Down, stick_y < STICK_LOW);
        snapshot.set(Button::Up, stick_y > STICK_HIGH);
        snapshot.set(Button::A, z);
        snapshot.set(Button::B, c);

        Ok(())
    }
}
