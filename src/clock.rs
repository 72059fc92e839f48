use crate::constants::TIER_DURATION;

/// Game-time clock. Only the top-level driver advances it; while paused it
/// hands out zero-length ticks.
#[derive(Clone, Debug, Default)]
pub struct SimulationClock {
    game_time: f32,
    paused: bool,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` and return the simulated step actually taken.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if self.paused || dt <= 0.0 {
            return 0.0;
        }
        self.game_time += dt;
        dt
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn game_time(&self) -> f32 {
        self.game_time
    }

    pub fn difficulty_tier(&self) -> u32 {
        difficulty_tier(self.game_time)
    }
}

/// Difficulty bucket for `game_time`: one step every [`TIER_DURATION`] seconds.
pub fn difficulty_tier(game_time: f32) -> u32 {
    (game_time.max(0.0) / TIER_DURATION).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_clock_does_not_advance() {
        let mut clock = SimulationClock::new();
        assert_eq!(clock.advance(0.5), 0.5);
        clock.pause();
        assert_eq!(clock.advance(0.5), 0.0);
        assert_eq!(clock.game_time(), 0.5);
        clock.resume();
        let _ = clock.advance(0.25);
        assert_eq!(clock.game_time(), 0.75);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(difficulty_tier(0.0), 0);
        assert_eq!(difficulty_tier(29.99), 0);
        assert_eq!(difficulty_tier(30.0), 1);
        assert_eq!(difficulty_tier(125.0), 4);
    }

    #[test]
    fn tier_is_monotonic() {
        let mut last = 0;
        for step in 0..2000 {
            let tier = difficulty_tier(step as f32 * 0.173);
            assert!(tier >= last);
            last = tier;
        }
    }
}
