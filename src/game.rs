//! Public game-loop surface
//!
//! [`Game`] wraps the simulation store behind a small driver API: feed it
//! held-key snapshots, call [`Game::tick`] once per frame, read entity
//! state back through [`Game::snapshot`] for drawing. An optional
//! completion callback fires exactly once when the final level clears.

use crate::config::{ConfigError, GameConfig};
use crate::sim::state::{
    Asteroid, GameState, Missile, Particle, Ship, ShipFragment, Stats, Ufo,
};
use crate::sim::{self, InputState, TickOutcome};

/// Read-only view of everything drawable, borrowed between ticks
#[derive(Debug, Clone, Copy)]
pub struct EntitySnapshot<'a> {
    pub ship: &'a Ship,
    pub asteroids: &'a [Asteroid],
    pub ufos: &'a [Ufo],
    pub missiles: &'a [Missile],
    pub particles: &'a [Particle],
    pub fragments: &'a [ShipFragment],
}

/// A running game: simulation state plus the current input snapshot
pub struct Game {
    state: GameState,
    input: InputState,
    on_complete: Option<Box<dyn FnMut(i64)>>,
    notified: bool,
}

impl Game {
    /// Start a game with an entropy-seeded RNG.
    ///
    /// The configuration is validated first; level 1 is deployed on success.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: GameState::new(config),
            input: InputState::default(),
            on_complete: None,
            notified: false,
        })
    }

    /// Start a game with a fixed RNG seed, for reproducible runs
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: GameState::with_seed(config, seed),
            input: InputState::default(),
            on_complete: None,
            notified: false,
        })
    }

    /// Register a callback invoked once with the final score on completion
    pub fn on_complete(&mut self, callback: impl FnMut(i64) + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Replace the held-key snapshot used by subsequent ticks
    pub fn set_input(&mut self, input: InputState) {
        self.input = input;
    }

    /// Advance the simulation by one frame of `elapsed` wall seconds
    pub fn tick(&mut self, elapsed: f32) -> TickOutcome {
        let outcome = sim::tick(&mut self.state, &self.input, elapsed);
        if outcome == TickOutcome::Complete && !self.notified {
            self.notified = true;
            if let Some(callback) = self.on_complete.as_mut() {
                callback(self.state.stats.score);
            }
        }
        outcome
    }

    /// Current level and score
    pub fn stats(&self) -> Stats {
        self.state.stats
    }

    /// Borrow everything a renderer needs for one frame
    pub fn snapshot(&self) -> EntitySnapshot<'_> {
        EntitySnapshot {
            ship: &self.state.ship,
            asteroids: &self.state.asteroids,
            ufos: &self.state.ufos,
            missiles: &self.state.missiles,
            particles: &self.state.particles,
            fragments: &self.state.fragments,
        }
    }

    /// Direct access to the simulation store
    pub fn state(&self) -> &GameState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LevelConfig;
    use std::cell::Cell;
    use std::rc::Rc;

    fn empty_campaign() -> GameConfig {
        GameConfig {
            levels: vec![LevelConfig {
                asteroids: 0,
                ufos: 0,
                ufo_interval: 2.0,
                ufo_speed: 2.0,
                ufo_pause: (3.0, 3.0),
                ufo_fire_interval: 1.0,
                asteroid_speed_bonus: 0.0,
            }],
            ..GameConfig::default_campaign()
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            levels: Vec::new(),
            ..GameConfig::default_campaign()
        };
        assert!(matches!(Game::new(config), Err(ConfigError::NoLevels)));
    }

    #[test]
    fn test_completion_callback_fires_exactly_once() {
        let mut game = Game::with_seed(empty_campaign(), 1).unwrap();
        let calls = Rc::new(Cell::new(0u32));
        let seen = calls.clone();
        game.on_complete(move |score| {
            seen.set(seen.get() + 1);
            assert_eq!(score, 0);
        });

        assert_eq!(game.tick(0.016), TickOutcome::Complete);
        assert_eq!(game.tick(0.016), TickOutcome::Complete);
        assert_eq!(game.tick(0.016), TickOutcome::Complete);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_snapshot_reflects_the_store() {
        let game = Game::with_seed(GameConfig::default_campaign(), 1).unwrap();
        let snapshot = game.snapshot();
        assert_eq!(snapshot.asteroids.len(), 4);
        assert!(snapshot.ufos.is_empty());
        assert_eq!(game.stats().level, 1);
    }
}
