//! Level and scoring configuration
//!
//! Supplied at initialization as an ordered list of level descriptors; the
//! level controller never invents level content. Validation is fail-fast:
//! a bad configuration is rejected before the loop starts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{ARENA_H, ARENA_W};

/// Configuration rejected at initialization
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no levels configured")]
    NoLevels,
    #[error("arena dimensions must be positive and finite")]
    BadArena,
    #[error("level {0}: ufo pause range is inverted or negative")]
    BadPauseRange(u32),
    #[error("level {0}: ufo speed and fire interval must be positive")]
    BadUfoParams(u32),
}

/// One level's population and UFO behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Asteroids deployed at level start
    pub asteroids: u32,
    /// Total UFOs this level will deploy (one active at a time)
    pub ufos: u32,
    /// Seconds between UFO deployments
    pub ufo_interval: f32,
    /// UFO travel speed, px per frame
    pub ufo_speed: f32,
    /// Seconds a UFO rests at a waypoint, drawn uniformly from (min, max)
    pub ufo_pause: (f32, f32),
    /// Minimum seconds between UFO missile shots
    pub ufo_fire_interval: f32,
    /// Added to every asteroid's per-tier speed this level
    #[serde(default)]
    pub asteroid_speed_bonus: f32,
}

/// Score deltas per event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreConfig {
    pub asteroid_gain: i64,
    pub ufo_gain: i64,
    /// Deducted when the ship is destroyed; score may go negative
    pub ship_loss_penalty: i64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            asteroid_gain: 20,
            ufo_gain: 100,
            ship_loss_penalty: 50,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_arena_w")]
    pub arena_width: f32,
    #[serde(default = "default_arena_h")]
    pub arena_height: f32,
    #[serde(default)]
    pub scoring: ScoreConfig,
    /// Ordered level descriptors; index 0 is level 1
    pub levels: Vec<LevelConfig>,
}

fn default_arena_w() -> f32 {
    ARENA_W
}

fn default_arena_h() -> f32 {
    ARENA_H
}

impl GameConfig {
    /// The classic two-level campaign
    pub fn default_campaign() -> Self {
        Self {
            arena_width: ARENA_W,
            arena_height: ARENA_H,
            scoring: ScoreConfig::default(),
            levels: vec![
                LevelConfig {
                    asteroids: 4,
                    ufos: 2,
                    ufo_interval: 2.0,
                    ufo_speed: 2.0,
                    ufo_pause: (3.0, 3.0),
                    ufo_fire_interval: 1.0,
                    asteroid_speed_bonus: 0.0,
                },
                LevelConfig {
                    asteroids: 6,
                    ufos: 3,
                    ufo_interval: 5.0,
                    ufo_speed: 2.0,
                    ufo_pause: (3.0, 3.0),
                    ufo_fire_interval: 1.0,
                    asteroid_speed_bonus: 0.0,
                },
            ],
        }
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        let finite_positive = |v: f32| v.is_finite() && v > 0.0;
        if !finite_positive(self.arena_width) || !finite_positive(self.arena_height) {
            return Err(ConfigError::BadArena);
        }
        for (idx, level) in self.levels.iter().enumerate() {
            let n = idx as u32 + 1;
            let (lo, hi) = level.ufo_pause;
            if lo < 0.0 || hi < lo || !lo.is_finite() || !hi.is_finite() {
                return Err(ConfigError::BadPauseRange(n));
            }
            if level.ufos > 0
                && (!finite_positive(level.ufo_speed)
                    || !finite_positive(level.ufo_fire_interval)
                    || level.ufo_interval < 0.0)
            {
                return Err(ConfigError::BadUfoParams(n));
            }
        }
        Ok(())
    }
}
