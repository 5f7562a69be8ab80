//! Entity types and the simulation store
//!
//! `GameState` exclusively owns every entity collection; only the per-frame
//! step in [`super::tick`] mutates it. Renderers read snapshots between
//! ticks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, LevelConfig};
use crate::consts::*;

/// Asteroid size class; splits one step down on destruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Large,
    Medium,
    Small,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Large, Tier::Medium, Tier::Small];

    /// Collision radius
    pub fn radius(self) -> f32 {
        match self {
            Tier::Large => 40.0,
            Tier::Medium => 22.0,
            Tier::Small => 12.0,
        }
    }

    /// Travel speed in px per frame (before the level bonus)
    pub fn base_speed(self) -> f32 {
        match self {
            Tier::Large => 0.5,
            Tier::Medium => 1.0,
            Tier::Small => 1.5,
        }
    }

    /// Spin rate in degrees per frame
    pub fn spin_rate(self) -> f32 {
        match self {
            Tier::Large => 0.25,
            Tier::Medium => 0.45,
            Tier::Small => 0.65,
        }
    }

    /// Tier of this tier's split children, if any
    pub fn split(self) -> Option<Tier> {
        match self {
            Tier::Large => Some(Tier::Medium),
            Tier::Medium => Some(Tier::Small),
            Tier::Small => None,
        }
    }

    /// Fixed polygon outline set for this tier
    pub fn shapes(self) -> &'static [&'static [(f32, f32)]] {
        match self {
            Tier::Large => &SHAPES_LARGE,
            Tier::Medium => &SHAPES_MEDIUM,
            Tier::Small => &SHAPES_SMALL,
        }
    }
}

/// Outline vertex offsets from the asteroid center, the classic shape sets
pub const SHAPES_LARGE: [&[(f32, f32)]; 3] = [
    &[
        (-39.0, -25.0),
        (-33.0, -8.0),
        (-38.0, 21.0),
        (-23.0, 25.0),
        (-13.0, 39.0),
        (24.0, 34.0),
        (38.0, 7.0),
        (33.0, -15.0),
        (38.0, -31.0),
        (16.0, -39.0),
        (-4.0, -34.0),
        (-16.0, -39.0),
    ],
    &[
        (-32.0, 35.0),
        (-4.0, 32.0),
        (24.0, 38.0),
        (38.0, 23.0),
        (31.0, -4.0),
        (38.0, -25.0),
        (14.0, -39.0),
        (-28.0, -31.0),
        (-39.0, -16.0),
        (-31.0, 4.0),
        (-38.0, 22.0),
    ],
    &[
        (12.0, -39.0),
        (-2.0, -26.0),
        (-28.0, -37.0),
        (-38.0, -14.0),
        (-21.0, 9.0),
        (-34.0, 34.0),
        (-6.0, 38.0),
        (35.0, 23.0),
        (21.0, -14.0),
        (36.0, -25.0),
    ],
];

pub const SHAPES_MEDIUM: [&[(f32, f32)]; 3] = [
    &[
        (-7.0, -19.0),
        (-19.0, -15.0),
        (-12.0, -5.0),
        (-19.0, 0.0),
        (-19.0, 13.0),
        (-9.0, 19.0),
        (12.0, 16.0),
        (18.0, 11.0),
        (13.0, 6.0),
        (19.0, -1.0),
        (16.0, -17.0),
    ],
    &[
        (9.0, -19.0),
        (18.0, -8.0),
        (7.0, 0.0),
        (15.0, 15.0),
        (-7.0, 13.0),
        (-16.0, 17.0),
        (-18.0, 3.0),
        (-13.0, -6.0),
        (-16.0, -17.0),
    ],
    &[
        (2.0, 18.0),
        (18.0, 10.0),
        (8.0, 0.0),
        (18.0, -13.0),
        (6.0, -18.0),
        (-17.0, -14.0),
        (-10.0, -3.0),
        (-13.0, 15.0),
    ],
];

pub const SHAPES_SMALL: [&[(f32, f32)]; 3] = [
    &[
        (-8.0, -8.0),
        (-5.0, -1.0),
        (-8.0, 3.0),
        (0.0, 9.0),
        (8.0, 4.0),
        (8.0, -5.0),
        (1.0, -9.0),
    ],
    &[
        (-6.0, 8.0),
        (1.0, 4.0),
        (8.0, 7.0),
        (10.0, -1.0),
        (4.0, -10.0),
        (-8.0, -6.0),
        (-4.0, 0.0),
    ],
    &[
        (-8.0, -9.0),
        (-5.0, -2.0),
        (-8.0, 5.0),
        (6.0, 8.0),
        (9.0, 6.0),
        (7.0, -3.0),
        (9.0, -9.0),
        (0.0, -7.0),
    ],
];

/// Diagonal travel direction for asteroids (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagonal {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Diagonal {
    pub const ALL: [Diagonal; 4] = [
        Diagonal::UpLeft,
        Diagonal::UpRight,
        Diagonal::DownLeft,
        Diagonal::DownRight,
    ];

    /// Displacement for one frame at the given speed
    pub fn step(self, speed: f32) -> Vec2 {
        match self {
            Diagonal::UpLeft => Vec2::new(-speed, -speed),
            Diagonal::UpRight => Vec2::new(speed, -speed),
            Diagonal::DownLeft => Vec2::new(-speed, speed),
            Diagonal::DownRight => Vec2::new(speed, speed),
        }
    }

    /// Reverse the vertical travel component, the bounce response
    pub fn flip_vertical(self) -> Self {
        match self {
            Diagonal::UpLeft => Diagonal::DownLeft,
            Diagonal::UpRight => Diagonal::DownRight,
            Diagonal::DownLeft => Diagonal::UpLeft,
            Diagonal::DownRight => Diagonal::UpRight,
        }
    }
}

/// Visual state of the ship, read by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipVisual {
    Normal,
    /// Destroyed this life; not drawn
    Hidden,
    /// Wreck marker shown after the recolor delay
    Recovering,
}

/// The player's ship; exactly one instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in degrees, wrapped to [0, 360)
    pub heading: f32,
    pub turn_rate: f32,
    pub thrust_speed: f32,
    pub friction: f32,
    pub radius: f32,
    /// Set once per life; re-armed by the next key input
    pub exploded: bool,
    pub visual: ShipVisual,
    /// Sim timestamp when the wreck recolors, if an explosion is pending
    pub recolor_at: Option<f32>,
}

impl Ship {
    pub fn new(arena: Vec2) -> Self {
        Self {
            pos: arena * 0.5,
            vel: Vec2::ZERO,
            heading: SHIP_START_HEADING,
            turn_rate: SHIP_TURN_RATE,
            thrust_speed: SHIP_THRUST_SPEED,
            friction: SHIP_FRICTION,
            radius: SHIP_RADIUS,
            exploded: false,
            visual: ShipVisual::Normal,
            recolor_at: None,
        }
    }
}

/// A drifting asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub tier: Tier,
    pub dir: Diagonal,
    /// px per frame; tier base plus the level's bonus
    pub speed: f32,
    /// Index into the tier's shape set
    pub shape: usize,
    /// Rotation angle in degrees
    pub angle: f32,
    /// Signed degrees per frame
    pub spin: f32,
    pub radius: f32,
}

/// Waypoint navigation state of a UFO
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UfoNav {
    Traveling,
    /// Resting at a waypoint until the given sim timestamp
    Paused { until: f32 },
}

/// A patrolling enemy craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ufo {
    pub id: u32,
    pub pos: Vec2,
    /// px per frame, level-configured
    pub speed: f32,
    /// Cyclic waypoint tour inside the arena
    pub waypoints: Vec<Vec2>,
    pub curr_point: usize,
    pub nav: UfoNav,
    /// Fire throttle; sim timestamp of the last shot
    pub last_fired_at: f32,
    pub radius: f32,
}

/// Who fired a missile; only ship missiles score or destroy UFOs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissileOwner {
    Ship,
    Ufo,
}

/// A missile traveling on a fixed heading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Missile {
    pub id: u32,
    pub pos: Vec2,
    /// Heading snapshot in degrees at fire time
    pub theta: f32,
    pub owner: MissileOwner,
    /// px per frame
    pub step: f32,
    pub radius: f32,
}

/// Fading explosion particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub alpha: f32,
    /// Alpha lost per frame
    pub fade: f32,
}

/// Line-segment debris from a destroyed ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipFragment {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Segment endpoint offset from `pos`
    pub extent: Vec2,
    pub angle: f32,
    /// Signed degrees per frame
    pub spin: f32,
    pub alpha: f32,
    pub fade: f32,
}

/// Running game totals, exposed to the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Current level, 1-based
    pub level: u32,
    /// Signed running total; ship losses may push it negative
    pub score: i64,
}

/// Whether the simulation is still running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    /// Final level cleared; terminal
    Complete,
}

/// Per-level progression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelPhase {
    NotStarted,
    Active,
    Cleared,
}

/// Runtime tracking for the level in progress
#[derive(Debug, Clone, Copy)]
pub struct LevelRuntime {
    pub phase: LevelPhase,
    /// UFOs deployed so far this level
    pub ufos_deployed: u32,
    /// At most one UFO is active at a time
    pub ufo_active: bool,
    /// Sim timestamp when the next UFO may deploy
    pub next_ufo_at: f32,
}

impl Default for LevelRuntime {
    fn default() -> Self {
        Self {
            phase: LevelPhase::NotStarted,
            ufos_deployed: 0,
            ufo_active: false,
            next_ufo_at: 0.0,
        }
    }
}

/// Complete simulation state; single writer is the per-frame step
#[derive(Debug)]
pub struct GameState {
    pub config: GameConfig,
    /// Arena dimensions (width, height)
    pub arena: Vec2,
    /// Monotonic sim clock in seconds, fed by tick elapsed time
    pub time: f32,
    pub phase: GamePhase,
    pub stats: Stats,
    pub level: LevelRuntime,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub ufos: Vec<Ufo>,
    pub missiles: Vec<Missile>,
    pub particles: Vec<Particle>,
    pub fragments: Vec<ShipFragment>,
    /// Ship fire throttle
    pub ship_last_fired_at: f32,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// New state with an entropy seed; deploys level 1.
    ///
    /// The configuration must be valid (see [`GameConfig::validate`]);
    /// [`crate::Game::new`] enforces this.
    pub fn new(config: GameConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// New state with a fixed seed, for reproducible tests
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let arena = Vec2::new(config.arena_width, config.arena_height);
        let mut state = Self {
            arena,
            time: 0.0,
            phase: GamePhase::Running,
            stats: Stats { level: 1, score: 0 },
            level: LevelRuntime::default(),
            ship: Ship::new(arena),
            asteroids: Vec::new(),
            ufos: Vec::new(),
            missiles: Vec::new(),
            particles: Vec::new(),
            fragments: Vec::new(),
            ship_last_fired_at: f32::NEG_INFINITY,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            config,
        };
        state.deploy_level();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Descriptor of the level in progress
    pub fn level_config(&self) -> &LevelConfig {
        &self.config.levels[self.stats.level as usize - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_split_chain() {
        assert_eq!(Tier::Large.split(), Some(Tier::Medium));
        assert_eq!(Tier::Medium.split(), Some(Tier::Small));
        assert_eq!(Tier::Small.split(), None);
    }

    #[test]
    fn test_tier_radii() {
        assert_eq!(Tier::Large.radius(), 40.0);
        assert_eq!(Tier::Medium.radius(), 22.0);
        assert_eq!(Tier::Small.radius(), 12.0);
    }

    #[test]
    fn test_each_tier_has_three_shapes() {
        for tier in Tier::ALL {
            assert_eq!(tier.shapes().len(), 3);
            for shape in tier.shapes() {
                assert!(shape.len() >= 3, "polygon needs at least 3 vertices");
            }
        }
    }

    #[test]
    fn test_diagonal_flip_vertical() {
        assert_eq!(Diagonal::UpLeft.flip_vertical(), Diagonal::DownLeft);
        assert_eq!(Diagonal::DownRight.flip_vertical(), Diagonal::UpRight);
        for dir in Diagonal::ALL {
            assert_eq!(dir.flip_vertical().flip_vertical(), dir);
        }
    }

    #[test]
    fn test_diagonal_step_signs() {
        let up_left = Diagonal::UpLeft.step(2.0);
        assert!(up_left.x < 0.0 && up_left.y < 0.0);
        let down_right = Diagonal::DownRight.step(2.0);
        assert!(down_right.x > 0.0 && down_right.y > 0.0);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::with_seed(crate::GameConfig::default_campaign(), 7);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }
}
