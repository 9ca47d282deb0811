use crate::frame::{encode, Frame};
use crate::mode::Mode;
use crate::tick::TickSource;
use crate::time::{ClockTime, Direction};

/// Shared state for the clock.
///
/// This is the only data touched from both the interrupt handlers and the main loop, and
/// every method is a single read-modify-write, so holding the resource lock for one call
/// is enough to keep the time consistent.
#[derive(Debug)]
pub struct ClockState {
    time: ClockTime,
    mode: Mode,
    /// The frame for the coming tick has already been shifted out
    frame_ready: bool,
}

impl ClockState {
    pub const fn new(time: ClockTime) -> Self {
        Self {
            time,
            mode: Mode::FreeRunning,
            frame_ready: false,
        }
    }

    pub fn time(&self) -> ClockTime {
        self.time
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The frame showing the time as it is now
    pub fn frame(&self) -> Frame {
        encode(self.time)
    }

    /// Advance one second. Called from the tick interrupt.
    ///
    /// Returns true if the latch should be pulsed. A tick that was already pending when an
    /// edit mode was entered is ignored.
    pub fn tick(&mut self) -> bool {
        if self.mode.is_editing() {
            return false;
        }

        self.time.tick();
        self.frame_ready = false;
        true
    }

    /// Handle a button press, moving to the next mode.
    ///
    /// The tick is stopped while the mode changes. It is only restarted, from a full
    /// period, on returning to free running.
    pub fn press(&mut self, tick: &mut impl TickSource) -> Mode {
        tick.disarm();

        self.mode = self.mode.next();
        #[cfg(feature = "defmt")]
        defmt::debug!("mode -> {}", self.mode);

        if self.mode == Mode::FreeRunning {
            self.frame_ready = false;
            tick.arm();
        }

        self.mode
    }

    /// The frame to shift out ahead of the next tick.
    ///
    /// Returns `None` if that frame has already been taken since the last tick, or while
    /// editing. The frame shows the time as it will be after the tick.
    pub fn take_frame(&mut self) -> Option<Frame> {
        if self.mode.is_editing() || self.frame_ready {
            return None;
        }

        self.frame_ready = true;
        Some(encode(self.time.next()))
    }

    /// Apply one encoder detent to the field under edit.
    ///
    /// Returns the frame to display straight away, or `None` when free running.
    pub fn rotate(&mut self, direction: Direction) -> Option<Frame> {
        let field = self.mode.field()?;
        self.time.adjust(field, direction);

        #[cfg(feature = "defmt")]
        defmt::debug!("{} {} -> {}", field, direction, self.time);

        Some(self.frame())
    }
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new(ClockTime::TWELVE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTick;

    #[test]
    fn tick_frame_handshake() {
        let mut clock = ClockState::default();

        let frame = clock.take_frame().unwrap();
        assert_eq!(frame, encode(ClockTime::new(1)));
        assert_eq!(clock.take_frame(), None);

        assert!(clock.tick());
        assert_eq!(clock.time(), ClockTime::new(1));

        assert_eq!(clock.take_frame(), Some(encode(ClockTime::new(2))));
        assert_eq!(clock.take_frame(), None);
    }

    #[test]
    fn power_on_frame_is_twelve() {
        let clock = ClockState::default();

        assert_eq!(clock.frame(), encode(ClockTime::TWELVE));
        assert_eq!(
            clock.frame().to_bytes(),
            [0x08, 0x04, 0x04, 0x01, 0x04, 0x01]
        );
    }

    #[test]
    fn take_frame_wraps_at_end_of_cycle() {
        let mut clock = ClockState::new(ClockTime::from_hms(11, 59, 59));

        assert_eq!(clock.take_frame(), Some(encode(ClockTime::TWELVE)));
    }

    #[test]
    fn press_cycles_and_controls_tick() {
        let mut clock = ClockState::default();
        let mut tick = MockTick::armed();

        assert_eq!(clock.press(&mut tick), Mode::EditHours);
        assert!(!tick.armed);
        assert_eq!(clock.press(&mut tick), Mode::EditMins);
        assert_eq!(clock.press(&mut tick), Mode::EditSecs);
        assert!(!tick.armed);
        assert_eq!(tick.arms, 0);

        assert_eq!(clock.press(&mut tick), Mode::FreeRunning);
        assert!(tick.armed);
        assert_eq!(tick.arms, 1);
        assert_eq!(tick.disarms, 4);
    }

    #[test]
    fn no_ticks_while_editing() {
        let mut clock = ClockState::new(ClockTime::from_hms(5, 0, 0));
        let mut tick = MockTick::armed();
        clock.press(&mut tick);

        assert!(!clock.tick());
        assert_eq!(clock.time(), ClockTime::from_hms(5, 0, 0));
        assert_eq!(clock.take_frame(), None);
    }

    #[test]
    fn rotate_edits_selected_field() {
        let mut clock = ClockState::new(ClockTime::from_hms(3, 59, 10));
        let mut tick = MockTick::armed();

        assert_eq!(clock.rotate(Direction::Up), None);
        assert_eq!(clock.time(), ClockTime::from_hms(3, 59, 10));

        clock.press(&mut tick);
        clock.press(&mut tick);
        assert_eq!(clock.mode(), Mode::EditMins);

        let frame = clock.rotate(Direction::Up).unwrap();
        assert_eq!(clock.time(), ClockTime::from_hms(3, 0, 10));
        assert_eq!(frame, encode(clock.time()));

        clock.press(&mut tick);
        clock.rotate(Direction::Down);
        assert_eq!(clock.time(), ClockTime::from_hms(3, 0, 9));
    }

    #[test]
    fn resume_reencodes_edited_time() {
        let mut clock = ClockState::default();
        let mut tick = MockTick::armed();

        clock.take_frame();
        clock.press(&mut tick);
        clock.rotate(Direction::Up);
        clock.press(&mut tick);
        clock.press(&mut tick);
        clock.press(&mut tick);

        assert_eq!(clock.mode(), Mode::FreeRunning);
        assert_eq!(
            clock.take_frame(),
            Some(encode(ClockTime::from_hms(1, 0, 1)))
        );
    }
}
