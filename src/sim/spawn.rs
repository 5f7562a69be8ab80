//! Entity spawning
//!
//! All creation paths for ships, asteroids (initial placement and split
//! children), UFOs with their waypoint tours, missiles, explosion particles
//! and ship debris. Draws randomness from the store's RNG only.

use glam::Vec2;
use rand::Rng;

use super::state::{
    Asteroid, Diagonal, GameState, LevelPhase, LevelRuntime, Missile, MissileOwner, Particle,
    Ship, ShipFragment, Tier, Ufo, UfoNav,
};
use crate::consts::*;
use crate::{deg_to_vec, wrap_deg};

impl GameState {
    /// Reset the ship to the arena center with zero velocity
    pub fn spawn_ship(&mut self) {
        self.ship = Ship::new(self.arena);
    }

    /// Spawn `count` asteroids.
    ///
    /// Unspecified fields are randomized: a perimeter-biased arena position
    /// (never with both coordinates inside the central band, which would put
    /// an asteroid on top of the freshly centered ship), a uniform tier and
    /// a uniform travel direction. Split children pass explicit values.
    pub fn spawn_asteroids(
        &mut self,
        count: u32,
        tier: Option<Tier>,
        at: Option<Vec2>,
        dir: Option<Diagonal>,
    ) {
        let speed_bonus = self.level_config().asteroid_speed_bonus;
        for _ in 0..count {
            let tier = tier.unwrap_or_else(|| Tier::ALL[self.rng.random_range(0..Tier::ALL.len())]);
            let pos = at.unwrap_or_else(|| self.perimeter_biased_point());
            let dir = dir.unwrap_or_else(|| self.random_direction());
            let shape = self.rng.random_range(0..tier.shapes().len());
            let spin = if self.rng.random_bool(0.5) {
                tier.spin_rate()
            } else {
                -tier.spin_rate()
            };
            let id = self.next_entity_id();
            self.asteroids.push(Asteroid {
                id,
                pos,
                tier,
                dir,
                speed: tier.base_speed() + speed_bonus,
                shape,
                angle: 0.0,
                spin,
                radius: tier.radius(),
            });
        }
    }

    /// Spawn `count` UFOs far off-arena, each with a fresh waypoint tour
    pub fn spawn_ufos(&mut self, count: u32) {
        let speed = self.level_config().ufo_speed;
        for _ in 0..count {
            let mut start = self.random_arena_point();
            // Enter from well outside the visible arena
            let offset = 2.0 * self.arena.y;
            if self.rng.random_bool(0.5) {
                start += Vec2::splat(offset);
            } else {
                start -= Vec2::splat(offset);
            }
            let waypoints = (0..UFO_WAYPOINT_COUNT)
                .map(|_| self.random_arena_point())
                .collect();
            let id = self.next_entity_id();
            self.ufos.push(Ufo {
                id,
                pos: start,
                speed,
                waypoints,
                curr_point: 0,
                nav: UfoNav::Traveling,
                last_fired_at: f32::NEG_INFINITY,
                radius: UFO_RADIUS,
            });
        }
    }

    /// Spawn a missile at `pos`.
    ///
    /// A supplied facing angle marks a ship shot; `None` means a UFO fired
    /// it on a random heading (UFOs have no facing), which also sets the
    /// owner tag.
    pub fn spawn_missile(&mut self, pos: Vec2, facing: Option<f32>) {
        let (theta, owner) = match facing {
            Some(deg) => (wrap_deg(deg), MissileOwner::Ship),
            None => (self.rng.random_range(0.0..360.0), MissileOwner::Ufo),
        };
        let id = self.next_entity_id();
        self.missiles.push(Missile {
            id,
            pos,
            theta,
            owner,
            step: MISSILE_STEP,
            radius: MISSILE_RADIUS,
        });
    }

    /// Burst of fading particles at an explosion site
    pub fn burst_particles(&mut self, at: Vec2, count: usize) {
        for _ in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                self.particles.remove(0);
            }
            let angle = self.rng.random_range(0.0..360.0);
            let speed = self.rng.random_range(0.0..PARTICLE_MAX_SPEED);
            self.particles.push(Particle {
                pos: at,
                vel: deg_to_vec(angle) * speed,
                alpha: 1.0,
                fade: PARTICLE_FADE,
            });
        }
    }

    /// Line-segment debris at the ship's position
    pub fn spawn_ship_fragments(&mut self, count: usize) {
        let at = self.ship.pos;
        let max_extent = self.ship.radius * 1.5;
        for _ in 0..count {
            let extent = Vec2::new(
                self.rng.random_range(1.0..max_extent),
                self.rng.random_range(1.0..max_extent),
            );
            let angle = self.rng.random_range(0.0..360.0);
            let drift = self.rng.random_range(0.0..PARTICLE_MAX_SPEED);
            let spin = if self.rng.random_bool(0.5) {
                FRAGMENT_SPIN
            } else {
                -FRAGMENT_SPIN
            };
            let vel_angle = self.rng.random_range(0.0..360.0);
            self.fragments.push(ShipFragment {
                pos: at,
                vel: deg_to_vec(vel_angle) * drift,
                extent,
                angle,
                spin,
                alpha: 1.0,
                fade: PARTICLE_FADE,
            });
        }
    }

    /// Deploy the current level: fresh ship, asteroid field, UFO schedule
    pub(crate) fn deploy_level(&mut self) {
        let level = self.level_config().clone();
        log::info!(
            "level {}: deploying {} asteroids, {} ufos",
            self.stats.level,
            level.asteroids,
            level.ufos
        );
        self.asteroids.clear();
        self.ufos.clear();
        self.spawn_ship();
        self.spawn_asteroids(level.asteroids, None, None, None);
        self.level = LevelRuntime {
            phase: LevelPhase::Active,
            ufos_deployed: 0,
            ufo_active: false,
            next_ufo_at: self.time + level.ufo_interval,
        };
    }

    fn random_arena_point(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.random_range(0.0..self.arena.x),
            self.rng.random_range(0.0..self.arena.y),
        )
    }

    /// Uniform arena point, re-rolled into the perimeter strips when both
    /// coordinates land in the central band
    fn perimeter_biased_point(&mut self) -> Vec2 {
        let (w, h) = (self.arena.x, self.arena.y);
        let mut p = self.random_arena_point();
        let x_central = p.x > w * SPAWN_BAND_MIN && p.x < w * SPAWN_BAND_MAX;
        let y_central = p.y > h * SPAWN_BAND_MIN && p.y < h * SPAWN_BAND_MAX;
        if x_central && y_central {
            p.x = self.perimeter_coord(w);
            p.y = self.perimeter_coord(h);
        }
        p
    }

    /// Coordinate in the near or far perimeter strip of an axis, coin flip
    fn perimeter_coord(&mut self, extent: f32) -> f32 {
        if self.rng.random_bool(0.5) {
            self.rng.random_range(0.0..extent * SPAWN_BAND_MIN)
        } else {
            self.rng.random_range(extent * SPAWN_BAND_MAX..extent)
        }
    }

    fn random_direction(&mut self) -> Diagonal {
        Diagonal::ALL[self.rng.random_range(0..Diagonal::ALL.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, LevelConfig};

    fn empty_level_config() -> GameConfig {
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
    fn test_asteroids_never_spawn_in_central_band() {
        let mut state = GameState::with_seed(empty_level_config(), 42);
        state.spawn_asteroids(300, None, None, None);
        let (w, h) = (state.arena.x, state.arena.y);
        for asteroid in &state.asteroids {
            let x_central =
                asteroid.pos.x > w * SPAWN_BAND_MIN && asteroid.pos.x < w * SPAWN_BAND_MAX;
            let y_central =
                asteroid.pos.y > h * SPAWN_BAND_MIN && asteroid.pos.y < h * SPAWN_BAND_MAX;
            assert!(
                !(x_central && y_central),
                "asteroid at {:?} inside the central band",
                asteroid.pos
            );
        }
    }

    #[test]
    fn test_explicit_spawn_fields_are_honored() {
        let mut state = GameState::with_seed(empty_level_config(), 42);
        let at = Vec2::new(100.0, 100.0);
        state.spawn_asteroids(1, Some(Tier::Medium), Some(at), Some(Diagonal::DownLeft));
        let asteroid = &state.asteroids[0];
        assert_eq!(asteroid.pos, at);
        assert_eq!(asteroid.tier, Tier::Medium);
        assert_eq!(asteroid.dir, Diagonal::DownLeft);
        assert_eq!(asteroid.radius, 22.0);
        assert_eq!(asteroid.speed, 1.0);
    }

    #[test]
    fn test_asteroid_speed_includes_level_bonus() {
        let mut config = empty_level_config();
        config.levels[0].asteroid_speed_bonus = 0.75;
        let mut state = GameState::with_seed(config, 42);
        state.spawn_asteroids(1, Some(Tier::Large), None, None);
        assert_eq!(state.asteroids[0].speed, 0.5 + 0.75);
    }

    #[test]
    fn test_ufos_spawn_off_arena_with_in_arena_waypoints() {
        let mut state = GameState::with_seed(empty_level_config(), 42);
        state.spawn_ufos(20);
        for ufo in &state.ufos {
            let inside = ufo.pos.x >= 0.0
                && ufo.pos.x < state.arena.x
                && ufo.pos.y >= 0.0
                && ufo.pos.y < state.arena.y;
            assert!(!inside, "ufo spawned inside the arena at {:?}", ufo.pos);
            assert_eq!(ufo.waypoints.len(), UFO_WAYPOINT_COUNT);
            for wp in &ufo.waypoints {
                assert!(wp.x >= 0.0 && wp.x < state.arena.x);
                assert!(wp.y >= 0.0 && wp.y < state.arena.y);
            }
            assert_eq!(ufo.nav, UfoNav::Traveling);
        }
    }

    #[test]
    fn test_missile_owner_follows_facing() {
        let mut state = GameState::with_seed(empty_level_config(), 42);
        state.spawn_missile(Vec2::new(10.0, 10.0), Some(45.0));
        state.spawn_missile(Vec2::new(10.0, 10.0), None);
        assert_eq!(state.missiles[0].owner, MissileOwner::Ship);
        assert_eq!(state.missiles[0].theta, 45.0);
        assert_eq!(state.missiles[1].owner, MissileOwner::Ufo);
    }

    #[test]
    fn test_particle_burst_count_and_cap() {
        let mut state = GameState::with_seed(empty_level_config(), 42);
        state.burst_particles(Vec2::new(50.0, 50.0), PARTICLE_BURST);
        assert_eq!(state.particles.len(), PARTICLE_BURST);
        for particle in &state.particles {
            assert_eq!(particle.alpha, 1.0);
            assert!(particle.vel.length() <= PARTICLE_MAX_SPEED);
        }

        // The cap drops the oldest particles instead of growing unbounded
        state.burst_particles(Vec2::ZERO, MAX_PARTICLES + 10);
        assert_eq!(state.particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_ship_spawns_at_arena_center() {
        let mut state = GameState::with_seed(empty_level_config(), 42);
        state.ship.pos = Vec2::new(7.0, 7.0);
        state.ship.vel = Vec2::new(3.0, 3.0);
        state.spawn_ship();
        assert_eq!(state.ship.pos, state.arena * 0.5);
        assert_eq!(state.ship.vel, Vec2::ZERO);
        assert!(!state.ship.exploded);
    }

    #[test]
    fn test_deploy_level_populates_store() {
        let mut config = empty_level_config();
        config.levels[0].asteroids = 5;
        let state = GameState::with_seed(config, 42);
        assert_eq!(state.asteroids.len(), 5);
        assert!(state.ufos.is_empty());
        assert_eq!(state.level.phase, LevelPhase::Active);
        assert_eq!(state.level.ufos_deployed, 0);
    }
}
