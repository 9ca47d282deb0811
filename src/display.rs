//! # Nixie display
//!
//! The tubes are driven by a chain of TPIC6595 power shift registers. Frames are clocked in
//! over SPI (SRCK/SER IN) and only appear on the tubes once the register clock (RCK) is
//! pulsed, so a frame can be loaded well ahead of the moment it should be shown.
//!
//! The latch must never be pulsed while a frame is half shifted in, or the tubes would show a
//! mix of two frames. Callers sharing the display between contexts must hold its lock across
//! [`NixieDisplay::shift_out`].

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::blocking::spi::Write;
use embedded_hal::digital::v2::OutputPin;

use crate::error::Error;
use crate::frame::{Frame, FRAME_BYTES};

/// Latch pulse width used by the reference wiring (µs)
pub const DEFAULT_LATCH_PULSE_US: u32 = 10_000;

/// Shift register chain with its latch line
pub struct NixieDisplay<SPI, RCK, D> {
    spi: SPI,
    latch: RCK,
    delay: D,
    pulse_us: u32,
}

impl<SPI, RCK, D, S, P> NixieDisplay<SPI, RCK, D>
where
    SPI: Write<u8, Error = S>,
    RCK: OutputPin<Error = P>,
    D: DelayUs<u32>,
{
    /// Take ownership of the bus and latch. The latch is driven low (idle).
    pub fn new(spi: SPI, mut latch: RCK, delay: D, pulse_us: u32) -> Result<Self, Error<S, P>> {
        latch.set_low().map_err(Error::Pin)?;

        Ok(Self {
            spi,
            latch,
            delay,
            pulse_us,
        })
    }

    /// Clock a frame into the shift registers without displaying it.
    ///
    /// Returns once the last byte has left the bus.
    pub fn shift_out(&mut self, frame: &Frame) -> Result<(), Error<S, P>> {
        self.spi.write(&frame.to_bytes()).map_err(Error::Spi)
    }

    /// Pulse the latch, showing the last frame shifted out
    pub fn latch(&mut self) -> Result<(), Error<S, P>> {
        self.latch.set_high().map_err(Error::Pin)?;
        self.delay.delay_us(self.pulse_us);
        self.latch.set_low().map_err(Error::Pin)
    }

    /// Shift out and latch a frame in one go
    pub fn show(&mut self, frame: &Frame) -> Result<(), Error<S, P>> {
        self.shift_out(frame)?;
        self.latch()
    }

    /// Turn every cathode off
    pub fn blank(&mut self) -> Result<(), Error<S, P>> {
        self.spi.write(&[0; FRAME_BYTES]).map_err(Error::Spi)?;
        self.latch()
    }
}
