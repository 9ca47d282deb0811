//! # Rotary encoder
//!
//! The encoder has two quadrature channels. Every change of channel A is one detent; comparing
//! the new level of A with B at the same moment gives the direction. If they differ the knob
//! was turned up, if they match it was turned down.
//!
//! Both channels are expected to be debounced before they reach the pins.

use embedded_hal::digital::v2::InputPin;

use crate::time::Direction;

/// Last observed level of channel A
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderPhase {
    a: bool,
}

impl EncoderPhase {
    pub const fn new(a: bool) -> Self {
        Self { a }
    }

    /// Feed one sample of both channels, returning the direction if a detent passed
    pub fn update(&mut self, a: bool, b: bool) -> Option<Direction> {
        if a == self.a {
            return None;
        }
        self.a = a;

        if a != b {
            Some(Direction::Up)
        } else {
            Some(Direction::Down)
        }
    }

    /// Forget any movement since the last sample
    pub fn resync(&mut self, a: bool) {
        self.a = a;
    }
}

/// Quadrature encoder on two input pins
pub struct RotaryEncoder<A, B> {
    a: A,
    b: B,
    phase: EncoderPhase,
}

impl<A, B, P> RotaryEncoder<A, B>
where
    A: InputPin<Error = P>,
    B: InputPin<Error = P>,
{
    /// Take the channel pins, starting from their current state
    pub fn new(a: A, b: B) -> Result<Self, P> {
        let phase = EncoderPhase::new(a.is_high()?);

        Ok(Self { a, b, phase })
    }

    /// Sample both channels
    pub fn poll(&mut self) -> Result<Option<Direction>, P> {
        let a = self.a.is_high()?;
        let b = self.b.is_high()?;

        Ok(self.phase.update(a, b))
    }

    /// Take the current level of channel A as the starting point
    pub fn resync(&mut self) -> Result<(), P> {
        let a = self.a.is_high()?;
        self.phase.resync(a);

        Ok(())
    }
}
