/// Magnet constants - the clamp range is intentionally asymmetric
pub mod magnet {
    /// Strongest attraction a seeker may switch on
    pub const MIN: f64 = -8.0;
    /// Strongest repulsion a seeker may switch on
    pub const MAX: f64 = 1.0;
    /// Distances are divided by torus diameter / FALLOFF before the bump function,
    /// so a field reaches a tenth of the map diagonal
    pub const FALLOFF: f64 = 10.0;
}

/// Default `[global]` section
pub mod global {
    /// Match length in ticks
    pub const PLAYTIME: u64 = 20_000;
    pub const PLAYERS: u32 = 2;
    /// Seekers per player
    pub const SEEKERS: u32 = 5;
    pub const GOALS: u32 = 6;
    /// Wall-clock duration of one tick in milliseconds
    pub const TICK_DURATION_MS: f64 = 10.0;
}

/// Default `[map]` section
pub mod map {
    pub const WIDTH: f64 = 768.0;
    pub const HEIGHT: f64 = 768.0;
}

/// Default `[camp]` section
pub mod camp {
    pub const WIDTH: f64 = 55.0;
    pub const HEIGHT: f64 = 55.0;
}

/// Default `[seeker]` section
pub mod seeker {
    pub const MASS: f64 = 1.0;
    pub const RADIUS: f64 = 10.0;
    pub const THRUST: f64 = 0.1;
    pub const FRICTION: f64 = 0.02;
    /// Thrust multiplier while the magnet is switched on
    pub const MAGNET_SLOWDOWN: f64 = 0.2;
    /// Ticks a seeker stays disabled after a collision
    pub const DISABLED_TIME: u32 = 250;
}

/// Default `[goal]` section
pub mod goal {
    pub const MASS: f64 = 0.5;
    pub const RADIUS: f64 = 6.0;
    pub const THRUST: f64 = 0.1;
    pub const FRICTION: f64 = 0.02;
    /// Ticks a goal must stay inside one camp to score
    pub const SCORING_TIME: f64 = 100.0;
}

/// Default player appearance, overridable on join
pub mod player {
    pub const COLOR: &str = "0xffffff";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnet_range_is_asymmetric() {
        assert_eq!(magnet::MIN, -8.0);
        assert_eq!(magnet::MAX, 1.0);
    }

    #[test]
    fn test_default_friction_in_unit_interval() {
        assert!(seeker::FRICTION > 0.0 && seeker::FRICTION < 1.0);
        assert!(goal::FRICTION > 0.0 && goal::FRICTION < 1.0);
    }
}
