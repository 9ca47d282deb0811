//! # Nixie clock
//!
//! Control logic for a 12-hour, six-tube nixie clock driven through a chain of TPIC6595
//! shift registers.
//!
//! ---
//!
//! The clock keeps a single counter of seconds since 12:00:00 ([`ClockTime`]). Once a
//! second the tick interrupt advances it and pulses the register latch; in between, the
//! main loop encodes the next [`Frame`] and shifts it out so that it is waiting in the
//! registers when the next latch pulse arrives.
//!
//! A push button cycles through the [`Mode`]s. In the three edit modes the tick is
//! stopped and a rotary encoder nudges the hours, minutes or seconds, with every
//! change shown immediately.
//!
//! Nothing here touches a specific microcontroller: the display and encoder are written
//! against `embedded-hal` 0.2, the periodic timer against [`TickSource`], and shared
//! state is accessed through [`rtic_core::Mutex`] so that the same code runs under RTIC
//! and in host tests.

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod controller;
pub mod display;
pub mod error;
pub mod frame;
pub mod input;
pub mod mode;
pub mod tick;
pub mod time;

#[cfg(test)]
mod mock;

pub use clock::ClockState;
pub use controller::ModeController;
pub use display::NixieDisplay;
pub use error::Error;
pub use frame::{encode, DisplayDigits, Frame};
pub use input::{EncoderPhase, RotaryEncoder};
pub use mode::Mode;
pub use tick::TickSource;
pub use time::{ClockTime, Direction, Field};
