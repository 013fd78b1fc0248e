//! In-game clock driven by the turn counter

use serde::{Deserialize, Serialize};

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 24 * MINUTES_PER_HOUR;

/// Wall time inside the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockTime {
    /// Day number, starting at 1
    pub day: u64,
    pub hour: u32,
    pub minute: u32,
}

impl core::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Day {} {:02}:{:02}", self.day, self.hour, self.minute)
    }
}

/// Maps turns to in-game time: one turn is one minute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    start_hour: u32,
}

impl GameClock {
    pub fn new(start_hour: u32) -> Self {
        Self {
            start_hour: start_hour % 24,
        }
    }

    /// Time after `turns` turns have passed
    pub fn at(&self, turns: u64) -> ClockTime {
        let total = self.start_hour as u64 * MINUTES_PER_HOUR + turns;
        ClockTime {
            day: total / MINUTES_PER_DAY + 1,
            hour: ((total % MINUTES_PER_DAY) / MINUTES_PER_HOUR) as u32,
            minute: (total % MINUTES_PER_HOUR) as u32,
        }
    }

    /// Night runs from 21:00 to 05:59
    pub fn is_night(&self, turns: u64) -> bool {
        let hour = self.at(turns).hour;
        !(6..21).contains(&hour)
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_rolls_over() {
        let clock = GameClock::new(23);
        let t = clock.at(75);
        assert_eq!(t, ClockTime { day: 2, hour: 0, minute: 15 });
        assert_eq!(t.to_string(), "Day 2 00:15");
    }

    #[test]
    fn test_night() {
        let clock = GameClock::new(8);
        assert!(!clock.is_night(0));
        assert!(clock.is_night(13 * 60));
    }
}
