use serde::{Deserialize, Serialize};

/// Ticks left before an ended round resets itself, `None` while a round is being played.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: Option<u8>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CountdownTick {
    /// No countdown was running.
    Idle,
    /// Still counting, with this many ticks left.
    Remaining(u8),
    /// Reached zero, the owner should reset.
    Expired,
}

impl Countdown {
    /// Ticks from round end to auto-reset, one per second.
    pub const START: u8 = 5;

    /// Interval between ticks in milliseconds.
    pub const TICK_MILLIS: u32 = 1_000;

    pub const fn remaining(self) -> Option<u8> {
        self.remaining
    }

    pub fn start(&mut self) {
        self.remaining = Some(Self::START);
    }

    pub fn clear(&mut self) {
        self.remaining = None;
    }

    pub fn tick(&mut self) -> CountdownTick {
        match self.remaining {
            None => CountdownTick::Idle,
            Some(0 | 1) => {
                self.remaining = Some(0);
                CountdownTick::Expired
            }
            Some(remaining) => {
                self.remaining = Some(remaining - 1);
                CountdownTick::Remaining(remaining - 1)
            }
        }
    }
}
