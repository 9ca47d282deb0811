//! Test doubles for the seams `embedded-hal-mock` doesn't cover

use std::io::ErrorKind;

use embedded_hal::blocking::spi::Write;
use embedded_hal_mock::MockError;

use crate::tick::TickSource;

/// SPI bus whose every write fails. The scripted SPI mock can't return errors.
pub struct BrokenBus;

impl Write<u8> for BrokenBus {
    type Error = MockError;

    fn write(&mut self, _words: &[u8]) -> Result<(), MockError> {
        Err(MockError::Io(ErrorKind::BrokenPipe))
    }
}

/// Tracks whether the tick is running
pub struct MockTick {
    pub armed: bool,
    pub arms: usize,
    pub disarms: usize,
    pub acks: usize,
}

impl MockTick {
    pub fn armed() -> Self {
        Self {
            armed: true,
            arms: 0,
            disarms: 0,
            acks: 0,
        }
    }
}

impl TickSource for MockTick {
    fn arm(&mut self) {
        self.armed = true;
        self.arms += 1;
    }

    fn disarm(&mut self) {
        self.armed = false;
        self.disarms += 1;
    }

    fn acknowledge(&mut self) {
        self.acks += 1;
    }
}

/// Resource that is never contended, standing in for an RTIC lock
pub struct Exclusive<T>(pub T);

impl<T> rtic_core::Mutex for Exclusive<T> {
    type T = T;

    fn lock<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.0)
    }
}
