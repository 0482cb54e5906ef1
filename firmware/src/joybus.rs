//! Joybus data line handling: console detection and the bit-banged
//! port the console backends transmit through.
//!
//! The line idles high through a pull-up; both sides drive it open
//! drain. A bit is a 4 us cell, low for 1 us ('1') or 3 us ('0'),
//! closed by a 1 us low stop bit.

use cortex_m::asm;
use crossbox_core::ConsoleIdentity;
use embassy_rp::gpio::{Flex, Pull};
use embassy_time::{with_timeout, Duration, Timer};

/// How long the boot probe listens for console traffic before
/// resolving to "no console".
const DETECT_TIMEOUT: Duration = Duration::from_millis(500);

/// An attached console keeps polling; one report's worth of silence
/// means the poll was missed and the response must not be sent late.
const POLL_TIMEOUT: Duration = Duration::from_millis(16);

/// Gap that ends a command burst.
const COMMAND_GAP: Duration = Duration::from_micros(6);

/// Cycles per microsecond at the stock 125 MHz system clock.
const CYCLES_PER_US: u32 = 125;

/// Classify the attached host from the Joybus data line.
///
/// One-shot, bounded: listens for the first command byte and resolves
/// to [`ConsoleIdentity::None`] when the line stays idle for
/// [`DETECT_TIMEOUT`].
pub async fn detect_console(pin: &mut Flex<'_>) -> ConsoleIdentity {
    pin.set_as_input();
    pin.set_pull(Pull::Up);

    match with_timeout(DETECT_TIMEOUT, read_command_byte(pin)).await {
        Ok(command) => classify(command),
        Err(_) => ConsoleIdentity::None,
    }
}

fn classify(command: u8) -> ConsoleIdentity {
    match command {
        // N64 consoles open with an info/reset request.
        0x01 | 0xFF => ConsoleIdentity::N64,
        // 0x00 ident is sent by both; GameCube is the common case and
        // its backend answers the ident either way.
        _ => ConsoleIdentity::GameCube,
    }
}

/// Read one command byte by sampling each bit cell 2 us after its
/// falling edge.
async fn read_command_byte(pin: &mut Flex<'_>) -> u8 {
    let mut byte = 0u8;
    for _ in 0..8 {
        pin.wait_for_falling_edge().await;
        Timer::after(Duration::from_micros(2)).await;
        byte = (byte << 1) | u8::from(pin.is_high());
        if pin.is_low() {
            pin.wait_for_rising_edge().await;
        }
    }
    byte
}

/// The transmit side of the Joybus line, owned by a console backend.
pub struct JoybusPort {
    pin: Flex<'static>,
}

impl JoybusPort {
    #[must_use]
    pub fn new(mut pin: Flex<'static>) -> Self {
        pin.set_as_input();
        pin.set_pull(Pull::Up);
        Self { pin }
    }

    /// Wait for the console's next poll command to finish.
    ///
    /// Returns once the line has been quiet for [`COMMAND_GAP`] after a
    /// burst, which is the moment the response must start. Missing a
    /// poll for a whole report interval is reported as `Err(())` so the
    /// caller can skip this cycle instead of answering a stale command.
    pub async fn await_poll(&mut self) -> Result<(), ()> {
        if with_timeout(POLL_TIMEOUT, self.pin.wait_for_falling_edge())
            .await
            .is_err()
        {
            return Err(());
        }
        // Consume the rest of the burst: edges keep arriving until the
        // command is over.
        while with_timeout(COMMAND_GAP, self.pin.wait_for_falling_edge())
            .await
            .is_ok()
        {}
        Ok(())
    }

    /// Clock out a response, blocking. A full 8-byte report takes
    /// ~260 us, well inside the protocol's reply window.
    pub fn transmit(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            for bit in (0..8).rev() {
                self.write_bit(byte >> bit & 1 != 0);
            }
        }
        // Stop bit.
        self.write_bit(true);
    }

    fn write_bit(&mut self, bit: bool) {
        let (low, high) = if bit { (1, 3) } else { (3, 1) };
        self.pin.set_low();
        self.pin.set_as_output();
        asm::delay(low * CYCLES_PER_US);
        // Release and let the pull-up take the line high.
        self.pin.set_as_input();
        asm::delay(high * CYCLES_PER_US);
    }
}
