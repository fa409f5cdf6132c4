use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::game::constants;
use crate::game::physical::{GoalProperties, PhysicalProperties, SeekerProperties};

/// Configuration errors. Fatal at construction: no game is built from an invalid config.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: String, value: f64 },
    #[error("{field} must lie strictly between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Match-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Ticks until the match finishes (0 finishes after the first tick)
    pub playtime: u64,
    pub players: u32,
    /// Seekers per player
    pub seekers: u32,
    pub goals: u32,
    /// Tick duration in milliseconds
    pub tick_duration: f64,
    /// Seed for the world RNG; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GlobalConfig {
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(self.tick_duration / 1000.0)
    }
}

/// Torus dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub width: f64,
    pub height: f64,
}

/// Camp rectangle dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CampConfig {
    pub width: f64,
    pub height: f64,
}

/// Complete game configuration, one section per concern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub global: GlobalConfig,
    pub map: MapConfig,
    pub camp: CampConfig,
    pub seeker: SeekerProperties,
    pub goal: GoalProperties,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            global: GlobalConfig {
                playtime: constants::global::PLAYTIME,
                players: constants::global::PLAYERS,
                seekers: constants::global::SEEKERS,
                goals: constants::global::GOALS,
                tick_duration: constants::global::TICK_DURATION_MS,
                seed: None,
            },
            map: MapConfig {
                width: constants::map::WIDTH,
                height: constants::map::HEIGHT,
            },
            camp: CampConfig {
                width: constants::camp::WIDTH,
                height: constants::camp::HEIGHT,
            },
            seeker: SeekerProperties {
                physical: PhysicalProperties {
                    mass: constants::seeker::MASS,
                    radius: constants::seeker::RADIUS,
                    thrust: constants::seeker::THRUST,
                    friction: constants::seeker::FRICTION,
                },
                magnet_slowdown: constants::seeker::MAGNET_SLOWDOWN,
                disabled_time: constants::seeker::DISABLED_TIME,
            },
            goal: GoalProperties {
                physical: PhysicalProperties {
                    mass: constants::goal::MASS,
                    radius: constants::goal::RADIUS,
                    thrust: constants::goal::THRUST,
                    friction: constants::goal::FRICTION,
                },
                scoring_time: constants::goal::SCORING_TIME,
            },
        }
    }
}

impl GameConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        let mut config = Self::default();

        override_from_env("SEEKERS_PLAYTIME", &mut config.global.playtime);
        override_from_env("SEEKERS_PLAYERS", &mut config.global.players);
        override_from_env("SEEKERS_SEEKERS", &mut config.global.seekers);
        override_from_env("SEEKERS_GOALS", &mut config.global.goals);
        override_from_env("SEEKERS_TICK_DURATION", &mut config.global.tick_duration);
        override_from_env("SEEKERS_MAP_WIDTH", &mut config.map.width);
        override_from_env("SEEKERS_MAP_HEIGHT", &mut config.map.height);
        override_from_env("SEEKERS_CAMP_WIDTH", &mut config.camp.width);
        override_from_env("SEEKERS_CAMP_HEIGHT", &mut config.camp.height);
        override_from_env("SEEKERS_DISABLED_TIME", &mut config.seeker.disabled_time);
        override_from_env("SEEKERS_SCORING_TIME", &mut config.goal.scoring_time);

        if let Ok(seed) = std::env::var("SEEKERS_SEED") {
            match seed.parse() {
                Ok(parsed) => config.global.seed = Some(parsed),
                Err(_) => tracing::warn!("Invalid SEEKERS_SEED '{}', using entropy", seed),
            }
        }

        config
    }

    /// Validate every numeric parameter, reporting the first violated field
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_count("global.players", self.global.players)?;
        check_count("global.seekers", self.global.seekers)?;
        check_count("global.goals", self.global.goals)?;
        check_positive("global.tick_duration", self.global.tick_duration)?;
        check_positive("map.width", self.map.width)?;
        check_positive("map.height", self.map.height)?;
        check_positive("camp.width", self.camp.width)?;
        check_positive("camp.height", self.camp.height)?;
        self.seeker.validate()?;
        self.goal.validate()?;
        Ok(())
    }
}

fn override_from_env<T: FromStr>(key: &str, target: &mut T) {
    if let Ok(raw) = std::env::var(key) {
        match raw.parse() {
            Ok(parsed) => *target = parsed,
            Err(_) => tracing::warn!("Invalid {} '{}', using default", key, raw),
        }
    }
}

pub(crate) fn check_positive(field: &str, value: f64) -> Result<f64, ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive {
            field: field.to_string(),
            value,
        })
    }
}

pub(crate) fn check_open_range(field: &str, value: f64, min: f64, max: f64) -> Result<f64, ConfigError> {
    if value > min && value < max {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        })
    }
}

fn check_count(field: &str, value: u32) -> Result<u32, ConfigError> {
    check_positive(field, f64::from(value)).map(|_| value)
}
