//! Astro Arena - a headless Asteroids-style arcade simulation engine
//!
//! Core modules:
//! - `sim`: the simulation (entities, collisions, per-frame step)
//! - `config`: level/score configuration and validation
//! - `game`: public game-loop surface (input in, snapshots out)
//!
//! Rendering, audio and key-event wiring live outside this crate; the
//! simulation consumes a per-tick snapshot of held keys and exposes
//! read-only entity state for drawing.

pub mod config;
pub mod game;
pub mod sim;

pub use config::{ConfigError, GameConfig, LevelConfig, ScoreConfig};
pub use game::{EntitySnapshot, Game};
pub use sim::{InputState, TickOutcome};

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Default arena dimensions (pixels); y grows downward
    pub const ARENA_W: f32 = 1024.0;
    pub const ARENA_H: f32 = 768.0;

    /// Ship defaults
    pub const SHIP_TURN_RATE: f32 = 5.0; // degrees per frame
    pub const SHIP_THRUST_SPEED: f32 = 2.4; // px per frame while thrust held
    pub const SHIP_FRICTION: f32 = 0.99; // multiplicative damping per frame
    pub const SHIP_RADIUS: f32 = 20.0;
    pub const SHIP_START_HEADING: f32 = 180.0;
    /// Minimum seconds between ship missiles
    pub const SHIP_FIRE_INTERVAL: f32 = 0.25;
    /// Seconds until a destroyed ship's wreck marker recolors
    pub const SHIP_RECOLOR_DELAY: f32 = 1.0;
    /// Debris pieces spawned on ship destruction
    pub const SHIP_FRAGMENT_COUNT: usize = 6;

    /// Missile defaults
    pub const MISSILE_STEP: f32 = 6.0; // px per frame
    pub const MISSILE_RADIUS: f32 = 4.0;

    /// UFO defaults
    pub const UFO_RADIUS: f32 = 30.0;
    pub const UFO_WAYPOINT_COUNT: usize = 8;
    /// Arrival band around a waypoint's x coordinate
    pub const UFO_ARRIVAL_TOLERANCE: f32 = 20.0;

    /// Asteroid spawn bias: the central band asteroids must not spawn in
    pub const SPAWN_BAND_MIN: f32 = 0.15;
    pub const SPAWN_BAND_MAX: f32 = 0.85;
    /// Maximum offset of split children from the parent
    pub const SPLIT_OFFSET_MAX: f32 = 30.0;

    /// Explosion particles
    pub const PARTICLE_BURST: usize = 50;
    pub const PARTICLE_FADE: f32 = 0.001; // alpha per frame
    pub const PARTICLE_MAX_SPEED: f32 = 0.1; // px per frame
    pub const MAX_PARTICLES: usize = 2048;

    /// Ship fragment spin, degrees per frame
    pub const FRAGMENT_SPIN: f32 = 0.2;
}

/// Wrap an angle in degrees to `[0, 360)`
#[inline]
pub fn wrap_deg(angle: f32) -> f32 {
    let a = angle % 360.0;
    if a < 0.0 { a + 360.0 } else { a }
}

/// Unit vector for a degree heading (y-down arena space)
#[inline]
pub fn deg_to_vec(deg: f32) -> Vec2 {
    let rad = deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_deg() {
        assert_eq!(wrap_deg(0.0), 0.0);
        assert_eq!(wrap_deg(360.0), 0.0);
        assert_eq!(wrap_deg(365.0), 5.0);
        assert_eq!(wrap_deg(-5.0), 355.0);
        assert_eq!(wrap_deg(725.0), 5.0);
    }

    #[test]
    fn test_deg_to_vec() {
        let right = deg_to_vec(0.0);
        assert!((right.x - 1.0).abs() < 1e-6 && right.y.abs() < 1e-6);

        // 90 degrees points down in y-down space
        let down = deg_to_vec(90.0);
        assert!(down.x.abs() < 1e-6 && (down.y - 1.0).abs() < 1e-6);
    }
}
