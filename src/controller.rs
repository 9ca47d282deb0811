//! # Control flow
//!
//! Work is split between two contexts:
//!
//! - the tick and button interrupts, which run to completion and never preempt one another
//!   ([`on_tick`], [`on_press`])
//! - the main loop, which spins on [`ModeController::service`]
//!
//! Shared state is only ever reached through a [`Mutex`], so the main loop's accesses are
//! critical sections with respect to the interrupts. The display is locked for the whole of a
//! shift so the tick can't pulse the latch halfway through a frame; at worst it is delayed by
//! one frame's transfer time.

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::blocking::spi::Write;
use embedded_hal::digital::v2::{InputPin, OutputPin};
use rtic_core::Mutex;

use crate::clock::ClockState;
use crate::display::NixieDisplay;
use crate::error::Error;
use crate::input::RotaryEncoder;
use crate::mode::Mode;
use crate::tick::TickSource;

/// Clear the registers, then show the starting time so the first second isn't dark.
///
/// Runs before any interrupt is enabled.
pub fn power_up<SPI, RCK, DL, S, P>(
    clock: &ClockState,
    display: &mut NixieDisplay<SPI, RCK, DL>,
) -> Result<(), Error<S, P>>
where
    SPI: Write<u8, Error = S>,
    RCK: OutputPin<Error = P>,
    DL: DelayUs<u32>,
{
    display.blank()?;
    display.show(&clock.frame())
}

/// Tick interrupt: schedule the next tick, advance the time and show the waiting frame
pub fn on_tick<K, T, C, D, SPI, RCK, DL, S, P>(
    tick: &mut T,
    clock: &mut C,
    display: &mut D,
) -> Result<(), Error<S, P>>
where
    K: TickSource,
    T: Mutex<T = K>,
    C: Mutex<T = ClockState>,
    D: Mutex<T = NixieDisplay<SPI, RCK, DL>>,
    SPI: Write<u8, Error = S>,
    RCK: OutputPin<Error = P>,
    DL: DelayUs<u32>,
{
    tick.lock(|t| t.acknowledge());

    if clock.lock(|c| c.tick()) {
        display.lock(|d| d.latch())?;
    }

    Ok(())
}

/// Button interrupt: move to the next mode
pub fn on_press<K, T, C>(tick: &mut T, clock: &mut C) -> Mode
where
    K: TickSource,
    T: Mutex<T = K>,
    C: Mutex<T = ClockState>,
{
    clock.lock(|c| tick.lock(|t| c.press(t)))
}

/// Main loop side of the clock.
///
/// While free running it keeps the next frame loaded in the shift registers. While editing
/// it turns encoder detents into adjustments and displays each one at once.
pub struct ModeController<A, B> {
    encoder: RotaryEncoder<A, B>,
    /// Mode seen on the previous pass
    seen: Mode,
}

impl<A, B, P> ModeController<A, B>
where
    A: InputPin<Error = P>,
    B: InputPin<Error = P>,
{
    pub fn new(encoder: RotaryEncoder<A, B>) -> Self {
        Self {
            encoder,
            seen: Mode::FreeRunning,
        }
    }

    /// One pass of the main loop
    pub fn service<C, D, SPI, RCK, DL, S>(
        &mut self,
        clock: &mut C,
        display: &mut D,
    ) -> Result<(), Error<S, P>>
    where
        C: Mutex<T = ClockState>,
        D: Mutex<T = NixieDisplay<SPI, RCK, DL>>,
        SPI: Write<u8, Error = S>,
        RCK: OutputPin<Error = P>,
        DL: DelayUs<u32>,
    {
        let mode = clock.lock(|c| c.mode());

        if mode != self.seen {
            self.seen = mode;
            if mode.is_editing() {
                self.encoder.resync().map_err(Error::Pin)?;
            }
        }

        if !mode.is_editing() {
            if let Some(frame) = clock.lock(|c| c.take_frame()) {
                display.lock(|d| d.shift_out(&frame))?;
            }
            return Ok(());
        }

        let Some(direction) = self.encoder.poll().map_err(Error::Pin)? else {
            return Ok(());
        };

        // The mode is checked again under the lock; a press may have landed since
        if let Some(frame) = clock.lock(|c| c.rotate(direction)) {
            display.lock(|d| d.show(&frame))?;
        }

        Ok(())
    }

    pub fn mode(&self) -> Mode {
        self.seen
    }
}
