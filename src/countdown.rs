// SPDX-License-Identifier: GPL-3.0-only

//! Capture countdown
//!
//! A short lead-in, then one digit per tick from `seconds` down to 1, then
//! the capture. The UI schedules a delayed tick message for every step;
//! each countdown carries an id so ticks from an aborted run are ignored.
//! [`CountdownTimer`] owns those decisions so the UI only runs what it is
//! told.

use crate::constants::timing;
use std::time::Duration;
use tracing::{debug, info};

/// What the UI should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    /// Show this digit and wait for the next tick
    Show(u32),
    /// Clear the digit and take the photo
    Capture,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    id: u64,
    next: u32,
    displayed: Option<u32>,
}

impl Countdown {
    /// Start a countdown from `seconds` (must be non-zero)
    pub fn new(id: u64, seconds: u32) -> Self {
        Self {
            id,
            next: seconds.max(1),
            displayed: None,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Digit currently on screen (none during the lead-in)
    pub fn displayed(&self) -> Option<u32> {
        self.displayed
    }

    /// Delay before the first tick
    pub fn lead_in() -> Duration {
        timing::COUNTDOWN_LEAD_IN
    }

    /// Delay between subsequent ticks
    pub fn interval() -> Duration {
        timing::COUNTDOWN_TICK
    }

    /// Advance one step
    pub fn tick(&mut self) -> CountdownStep {
        if self.next == 0 {
            self.displayed = None;
            return CountdownStep::Capture;
        }
        let digit = self.next;
        self.displayed = Some(digit);
        self.next -= 1;
        CountdownStep::Show(digit)
    }
}

/// What the UI should do after a press or a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownAction {
    /// Deliver a tick for countdown `id` after `delay`
    Schedule { id: u64, delay: Duration },
    /// Take the photo now
    Capture,
    /// Nothing to do
    Ignore,
}

/// Runs at most one countdown at a time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountdownTimer {
    generation: u64,
    running: Option<Countdown>,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Digit to show over the preview
    pub fn displayed(&self) -> Option<u32> {
        self.running.as_ref().and_then(Countdown::displayed)
    }

    /// Shutter pressed
    ///
    /// Aborts a running countdown. Otherwise starts one from `seconds`, or
    /// captures straight away when `seconds` is zero.
    pub fn press(&mut self, seconds: u32) -> CountdownAction {
        if self.cancel() {
            return CountdownAction::Ignore;
        }
        if seconds == 0 {
            return CountdownAction::Capture;
        }

        self.generation = self.generation.wrapping_add(1);
        let id = self.generation;
        self.running = Some(Countdown::new(id, seconds));
        info!(id, seconds, "Starting countdown");
        CountdownAction::Schedule {
            id,
            delay: Countdown::lead_in(),
        }
    }

    /// Tick delivered for countdown `id`
    pub fn tick(&mut self, id: u64) -> CountdownAction {
        let Some(countdown) = self.running.as_mut().filter(|c| c.id() == id) else {
            debug!(id, "Ignoring stale countdown tick");
            return CountdownAction::Ignore;
        };

        match countdown.tick() {
            CountdownStep::Show(digit) => {
                info!(id, digit, "Countdown");
                CountdownAction::Schedule {
                    id,
                    delay: Countdown::interval(),
                }
            }
            CountdownStep::Capture => {
                self.running = None;
                CountdownAction::Capture
            }
        }
    }

    /// Abort the running countdown; returns whether one was running
    pub fn cancel(&mut self) -> bool {
        match self.running.take() {
            Some(countdown) => {
                info!(id = countdown.id(), "Countdown aborted");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduled_id(action: CountdownAction) -> u64 {
        match action {
            CountdownAction::Schedule { id, .. } => id,
            other => panic!("expected a scheduled tick, got {other:?}"),
        }
    }

    #[test]
    fn test_three_two_one_capture() {
        let mut countdown = Countdown::new(1, 3);
        assert_eq!(countdown.displayed(), None);
        assert_eq!(countdown.tick(), CountdownStep::Show(3));
        assert_eq!(countdown.tick(), CountdownStep::Show(2));
        assert_eq!(countdown.tick(), CountdownStep::Show(1));
        assert_eq!(countdown.displayed(), Some(1));
        assert_eq!(countdown.tick(), CountdownStep::Capture);
        assert_eq!(countdown.displayed(), None);
    }

    #[test]
    fn test_timing_matches_booth_rhythm() {
        assert_eq!(Countdown::lead_in(), Duration::from_millis(500));
        assert_eq!(Countdown::interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_timer_runs_to_capture() {
        let mut timer = CountdownTimer::new();
        let started = timer.press(2);
        assert_eq!(
            started,
            CountdownAction::Schedule {
                id: 1,
                delay: Countdown::lead_in()
            }
        );
        assert!(timer.is_running());
        assert_eq!(timer.displayed(), None);

        assert_eq!(
            timer.tick(1),
            CountdownAction::Schedule {
                id: 1,
                delay: Countdown::interval()
            }
        );
        assert_eq!(timer.displayed(), Some(2));
        timer.tick(1);
        assert_eq!(timer.displayed(), Some(1));
        assert_eq!(timer.tick(1), CountdownAction::Capture);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_second_press_aborts() {
        let mut timer = CountdownTimer::new();
        let id = scheduled_id(timer.press(3));
        timer.tick(id);

        assert_eq!(timer.press(3), CountdownAction::Ignore);
        assert!(!timer.is_running());
        assert_eq!(timer.displayed(), None);
    }

    #[test]
    fn test_ticks_from_aborted_countdown_are_ignored() {
        let mut timer = CountdownTimer::new();
        let old = scheduled_id(timer.press(3));
        timer.press(3);
        let new = scheduled_id(timer.press(3));
        assert_ne!(old, new);

        assert_eq!(timer.tick(old), CountdownAction::Ignore);
        assert_eq!(timer.displayed(), None);
        assert!(matches!(timer.tick(new), CountdownAction::Schedule { .. }));
        assert_eq!(timer.displayed(), Some(3));
    }

    #[test]
    fn test_tick_without_countdown_is_ignored() {
        let mut timer = CountdownTimer::new();
        assert_eq!(timer.tick(1), CountdownAction::Ignore);
        assert!(!timer.cancel());
    }

    #[test]
    fn test_zero_seconds_captures_immediately() {
        let mut timer = CountdownTimer::new();
        assert_eq!(timer.press(0), CountdownAction::Capture);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_zero_is_treated_as_one() {
        let mut countdown = Countdown::new(7, 0);
        assert_eq!(countdown.id(), 7);
        assert_eq!(countdown.tick(), CountdownStep::Show(1));
        assert_eq!(countdown.tick(), CountdownStep::Capture);
    }
}
