use chrono::{DateTime, FixedOffset, Timelike, Utc};

use crate::facts::profile::Profile;

#[derive(Clone, Copy, Debug, PartialEq, Eq, proc_macros::AsText, proc_macros::Variants)]
pub enum Mode {
    Morning,
    Afternoon,
    Night,
}

/// Half-open hour ranges; hours outside every range map to [`DEFAULT_MODE`].
const MODE_TABLE: &[(u32, u32, Mode)] = &[(5, 12, Mode::Morning), (12, 18, Mode::Afternoon)];
const DEFAULT_MODE: Mode = Mode::Night;

impl Mode {
    pub fn for_hour(hour: u32) -> Mode {
        let hour = hour % 24;

        MODE_TABLE
            .iter()
            .find(|(start, end, _)| (*start..*end).contains(&hour))
            .map(|(_, _, mode)| *mode)
            .unwrap_or(DEFAULT_MODE)
    }

    pub fn at(now: DateTime<Utc>, zone: FixedOffset) -> Mode {
        Mode::for_hour(now.with_timezone(&zone).hour())
    }

    pub fn profile(&self) -> Profile {
        match self {
            Mode::Morning => Profile::Plain,
            Mode::Afternoon => Profile::IcebergObscure,
            Mode::Night => Profile::DarkHistory,
        }
    }
}
