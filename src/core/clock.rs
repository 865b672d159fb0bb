//! Survival clock - how long the player has stayed alive in a run.

use bevy::prelude::*;

/// Time alive in the current run.
#[derive(Resource, Debug, Default)]
pub struct SurvivalClock {
    pub running: bool,
    pub elapsed: f32,
}

impl SurvivalClock {
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn advance(&mut self, delta: f32) {
        if self.running {
            self.elapsed += delta;
        }
    }

    pub fn minutes(&self) -> u32 {
        (self.elapsed / 60.0).floor() as u32
    }

    pub fn seconds(&self) -> u32 {
        (self.elapsed % 60.0).floor() as u32
    }

    /// Final time as shown on the death screen, e.g. `3:07`.
    pub fn formatted(&self) -> String {
        format!("{}:{:02}", self.minutes(), self.seconds())
    }
}

/// Advance the clock with virtual time (stops while paused).
pub fn tick_survival_clock(time: Res<Time>, mut clock: ResMut<SurvivalClock>) {
    clock.advance(time.delta_secs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_clock_does_not_advance() {
        let mut clock = SurvivalClock::default();
        clock.advance(5.0);
        assert_eq!(clock.elapsed, 0.0);

        clock.set_running(true);
        clock.advance(5.0);
        assert_eq!(clock.elapsed, 5.0);
    }

    #[test]
    fn formats_minutes_and_padded_seconds() {
        let clock = SurvivalClock {
            running: false,
            elapsed: 187.9,
        };
        assert_eq!(clock.minutes(), 3);
        assert_eq!(clock.seconds(), 7);
        assert_eq!(clock.formatted(), "3:07");
    }

    #[test]
    fn formats_double_digit_seconds() {
        let clock = SurvivalClock {
            running: false,
            elapsed: 42.0,
        };
        assert_eq!(clock.formatted(), "0:42");
    }

    #[test]
    fn reset_clears_elapsed_time() {
        let mut clock = SurvivalClock {
            running: true,
            elapsed: 99.0,
        };
        clock.reset();
        assert_eq!(clock.elapsed, 0.0);
        assert!(clock.running);
    }
}
