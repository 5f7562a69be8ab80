//! The simulation core
//!
//! All gameplay logic lives here: the entity store ([`state`]), spawning
//! ([`spawn`]), collision detection ([`collision`]), UFO navigation
//! ([`ufo`]) and the per-frame step ([`tick`]). Everything is headless;
//! rendering reads the store between ticks.

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod ufo;

pub use collision::circles_overlap;
pub use state::{
    Asteroid, Diagonal, GamePhase, GameState, LevelPhase, LevelRuntime, Missile, MissileOwner,
    Particle, Ship, ShipFragment, ShipVisual, Stats, Tier, Ufo, UfoNav,
};
pub use tick::{InputState, TickOutcome, tick};
