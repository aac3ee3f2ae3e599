use serde::Serialize;

use crate::recipe::progress_fraction;

/// Something the listener should hear about. The timer only returns cues;
/// turning them into sound is the caller's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
pub enum Cue {
    Tick,
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum TimerState {
    #[default]
    Idle,
    Running {
        initial: u32,
        remaining: u32,
    },
    Finished {
        initial: u32,
    },
}

/// Whole-second countdown. Knows nothing about clocks or audio: somebody
/// else calls [`BrewTimer::tick`] once per elapsed second.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrewTimer {
    state: TimerState,
}

impl BrewTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a countdown of `secs` seconds, replacing whatever ran before.
    ///
    /// The first tick cue fires right away so the listener hears the
    /// countdown begin. A zero-length countdown finishes on the spot.
    pub fn start(&mut self, secs: u32) -> Option<Cue> {
        self.cancel();

        if secs == 0 {
            self.state = TimerState::Finished { initial: 0 };
            return Some(Cue::Finish);
        }

        self.state = TimerState::Running {
            initial: secs,
            remaining: secs,
        };
        Some(Cue::Tick)
    }

    /// One second has passed.
    pub fn tick(&mut self) -> Option<Cue> {
        match self.state {
            TimerState::Running { initial, remaining } if remaining <= 1 => {
                self.state = TimerState::Finished { initial };
                Some(Cue::Finish)
            }
            TimerState::Running { initial, remaining } => {
                self.state = TimerState::Running {
                    initial,
                    remaining: remaining - 1,
                };
                Some(Cue::Tick)
            }
            TimerState::Idle | TimerState::Finished { .. } => None,
        }
    }

    /// Drop back to idle without finishing. Never produces a cue.
    pub fn cancel(&mut self) {
        self.state = TimerState::Idle;
    }

    pub fn remaining_seconds(&self) -> u32 {
        match self.state {
            TimerState::Running { remaining, .. } => remaining,
            TimerState::Idle | TimerState::Finished { .. } => 0,
        }
    }

    pub fn initial_seconds(&self) -> u32 {
        match self.state {
            TimerState::Running { initial, .. } | TimerState::Finished { initial } => initial,
            TimerState::Idle => 0,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, TimerState::Finished { .. })
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, TimerState::Idle)
    }

    /// Elapsed share of the countdown, `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        progress_fraction(self.initial_seconds(), self.remaining_seconds())
    }
}
