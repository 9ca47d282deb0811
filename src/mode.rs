use crate::time::Field;

/// What the clock is doing.
///
/// Each button press moves to the next mode, cycling
/// `FreeRunning -> EditHours -> EditMins -> EditSecs -> FreeRunning`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Counting seconds from the tick
    #[default]
    FreeRunning,
    EditHours,
    EditMins,
    EditSecs,
}

impl Mode {
    /// The mode after one button press
    pub const fn next(self) -> Self {
        match self {
            Mode::FreeRunning => Mode::EditHours,
            Mode::EditHours => Mode::EditMins,
            Mode::EditMins => Mode::EditSecs,
            Mode::EditSecs => Mode::FreeRunning,
        }
    }

    /// The field under edit, or `None` when free running
    pub const fn field(self) -> Option<Field> {
        match self {
            Mode::FreeRunning => None,
            Mode::EditHours => Some(Field::Hours),
            Mode::EditMins => Some(Field::Minutes),
            Mode::EditSecs => Some(Field::Seconds),
        }
    }

    pub const fn is_editing(self) -> bool {
        self.field().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Mode; 4] = [
        Mode::FreeRunning,
        Mode::EditHours,
        Mode::EditMins,
        Mode::EditSecs,
    ];

    #[test]
    fn cycle_order() {
        let mut mode = Mode::default();
        assert_eq!(mode, Mode::FreeRunning);

        mode = mode.next();
        assert_eq!(mode, Mode::EditHours);
        mode = mode.next();
        assert_eq!(mode, Mode::EditMins);
        mode = mode.next();
        assert_eq!(mode, Mode::EditSecs);
        mode = mode.next();
        assert_eq!(mode, Mode::FreeRunning);
    }

    #[test]
    fn four_presses_from_anywhere() {
        for start in ALL {
            assert_eq!(start.next().next().next().next(), start);
        }
    }

    #[test]
    fn edit_fields() {
        assert_eq!(Mode::FreeRunning.field(), None);
        assert_eq!(Mode::EditHours.field(), Some(Field::Hours));
        assert_eq!(Mode::EditMins.field(), Some(Field::Minutes));
        assert_eq!(Mode::EditSecs.field(), Some(Field::Seconds));
        assert!(!Mode::FreeRunning.is_editing());
    }
}
