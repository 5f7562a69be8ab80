//! Per-frame simulation step
//!
//! `tick` is the single writer of [`GameState`]. Each call advances the sim
//! clock, applies held input to the ship, navigates UFOs, moves projectiles
//! and asteroids, resolves collisions and applies level progression, in
//! that order. Entity removal is deferred: collision passes collect IDs
//! first and apply them after iteration.
//!
//! Motion is frame-coupled in the classic arcade style: speeds are px per
//! frame, not px per second. Elapsed time only drives timers (fire
//! throttles, UFO pauses, the recolor delay).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::circles_overlap;
use super::state::{
    GamePhase, GameState, LevelPhase, MissileOwner, ShipVisual, Tier,
};
use super::ufo;
use crate::consts::*;
use crate::{deg_to_vec, wrap_deg};

/// Snapshot of held keys for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
    pub fire: bool,
}

impl InputState {
    /// True if any key is held; re-arms a destroyed ship
    pub fn any_held(&self) -> bool {
        self.left || self.right || self.thrust || self.fire
    }
}

/// What the caller should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Final level cleared; further ticks are no-ops
    Complete,
}

/// Advance the simulation by one frame.
///
/// `dt` is the elapsed wall time in seconds since the previous tick. A
/// non-positive or non-finite `dt` leaves the state untouched.
pub fn tick(state: &mut GameState, input: &InputState, dt: f32) -> TickOutcome {
    if state.phase == GamePhase::Complete {
        return TickOutcome::Complete;
    }
    if !(dt.is_finite() && dt > 0.0) {
        return TickOutcome::Continue;
    }
    state.time += dt;
    let now = state.time;
    let level = state.level_config().clone();

    // Level progression first, so a cleared field from the previous frame
    // advances before anything new is simulated
    if state.level.phase == LevelPhase::Active
        && state.asteroids.is_empty()
        && state.ufos.is_empty()
        && state.level.ufos_deployed >= level.ufos
    {
        state.level.phase = LevelPhase::Cleared;
        if state.stats.level as usize >= state.config.levels.len() {
            state.phase = GamePhase::Complete;
            log::info!("campaign complete, final score {}", state.stats.score);
            return TickOutcome::Complete;
        }
        state.stats.level += 1;
        state.deploy_level();
        return TickOutcome::Continue;
    }

    // A destroyed ship comes back on the next key press, where it drifted
    if state.ship.exploded && input.any_held() {
        state.ship.exploded = false;
        state.ship.visual = ShipVisual::Normal;
        state.ship.recolor_at = None;
    }

    if !state.ship.exploded {
        advance_ship(state, input);
        if input.fire && now >= state.ship_last_fired_at + SHIP_FIRE_INTERVAL {
            state.ship_last_fired_at = now;
            let (pos, heading) = (state.ship.pos, state.ship.heading);
            state.spawn_missile(pos, Some(heading));
        }
    }

    // One UFO at a time, on the level's deployment schedule
    if state.level.ufos_deployed < level.ufos
        && !state.level.ufo_active
        && now >= state.level.next_ufo_at
    {
        state.spawn_ufos(1);
        state.level.ufos_deployed += 1;
        state.level.ufo_active = true;
        log::debug!(
            "ufo {}/{} deployed at t={now:.1}",
            state.level.ufos_deployed,
            level.ufos
        );
    }

    let mut shots: Vec<Vec2> = Vec::new();
    {
        let GameState { ufos, rng, .. } = &mut *state;
        for u in ufos.iter_mut() {
            ufo::navigate(u, now, &level, rng);
            if now >= u.last_fired_at + level.ufo_fire_interval {
                u.last_fired_at = now;
                shots.push(u.pos);
            }
        }
    }
    for pos in shots {
        state.spawn_missile(pos, None);
    }

    let arena = state.arena;
    for missile in &mut state.missiles {
        missile.pos += deg_to_vec(missile.theta) * missile.step;
    }
    state.missiles.retain(|m| {
        m.pos.x >= 0.0 && m.pos.x <= arena.x && m.pos.y >= 0.0 && m.pos.y <= arena.y
    });

    let mut ship_hit = false;
    if !state.ship.exploded {
        let (ship_pos, ship_radius) = (state.ship.pos, state.ship.radius);
        state.missiles.retain(|m| {
            let hit = m.owner == MissileOwner::Ufo
                && circles_overlap(m.pos, m.radius, ship_pos, ship_radius);
            ship_hit |= hit;
            !hit
        });
    }

    for asteroid in &mut state.asteroids {
        asteroid.pos += asteroid.dir.step(asteroid.speed);
        asteroid.angle = wrap_deg(asteroid.angle + asteroid.spin);
        wrap_position(&mut asteroid.pos, asteroid.radius, arena);
    }

    if !state.ship.exploded {
        let (ship_pos, ship_radius) = (state.ship.pos, state.ship.radius);
        ship_hit |= state
            .asteroids
            .iter()
            .any(|a| circles_overlap(a.pos, a.radius, ship_pos, ship_radius));
        ship_hit |= state
            .ufos
            .iter()
            .any(|u| circles_overlap(u.pos, u.radius, ship_pos, ship_radius));
    }

    // Missile-asteroid impacts; each missile consumes at most one asteroid
    // and vice versa
    let mut spent_missiles: Vec<u32> = Vec::new();
    let mut impacts: Vec<(u32, Vec2, Tier, MissileOwner)> = Vec::new();
    for missile in &state.missiles {
        for asteroid in &state.asteroids {
            if impacts.iter().any(|&(id, ..)| id == asteroid.id) {
                continue;
            }
            if circles_overlap(missile.pos, missile.radius, asteroid.pos, asteroid.radius) {
                spent_missiles.push(missile.id);
                impacts.push((asteroid.id, asteroid.pos, asteroid.tier, missile.owner));
                break;
            }
        }
    }
    state.missiles.retain(|m| !spent_missiles.contains(&m.id));
    for (id, pos, tier, owner) in impacts {
        state.asteroids.retain(|a| a.id != id);
        if owner == MissileOwner::Ship {
            state.stats.score += state.config.scoring.asteroid_gain;
        }
        split_asteroid(state, pos, tier);
        state.burst_particles(pos, PARTICLE_BURST);
    }

    // Overlapping asteroids bounce by reversing vertical travel
    for i in 0..state.asteroids.len() {
        for j in (i + 1)..state.asteroids.len() {
            let (left, right) = state.asteroids.split_at_mut(j);
            let (a, b) = (&mut left[i], &mut right[0]);
            if circles_overlap(a.pos, a.radius, b.pos, b.radius) {
                a.dir = a.dir.flip_vertical();
                b.dir = b.dir.flip_vertical();
            }
        }
    }

    // Only ship missiles bring down UFOs
    let mut spent_missiles: Vec<u32> = Vec::new();
    let mut dead_ufos: Vec<(u32, Vec2)> = Vec::new();
    for missile in state.missiles.iter().filter(|m| m.owner == MissileOwner::Ship) {
        for u in &state.ufos {
            if dead_ufos.iter().any(|&(id, _)| id == u.id) {
                continue;
            }
            if circles_overlap(missile.pos, missile.radius, u.pos, u.radius) {
                spent_missiles.push(missile.id);
                dead_ufos.push((u.id, u.pos));
                break;
            }
        }
    }
    state.missiles.retain(|m| !spent_missiles.contains(&m.id));
    for (id, pos) in dead_ufos {
        state.ufos.retain(|u| u.id != id);
        state.stats.score += state.config.scoring.ufo_gain;
        state.burst_particles(pos, PARTICLE_BURST);
        state.level.ufo_active = false;
        state.level.next_ufo_at = now + level.ufo_interval;
        log::debug!("ufo destroyed, score {}", state.stats.score);
    }

    for p in &mut state.particles {
        p.pos += p.vel;
        p.alpha -= p.fade;
    }
    state.particles.retain(|p| p.alpha > 0.0);
    for f in &mut state.fragments {
        f.pos += f.vel;
        f.angle = wrap_deg(f.angle + f.spin);
        f.alpha -= f.fade;
    }
    state.fragments.retain(|f| f.alpha > 0.0);

    if ship_hit {
        explode_ship(state);
    }
    if let Some(at) = state.ship.recolor_at {
        if now >= at {
            state.ship.visual = ShipVisual::Recovering;
            state.ship.recolor_at = None;
        }
    }

    TickOutcome::Continue
}

/// Turn, thrust, drift and wrap the ship for one frame
fn advance_ship(state: &mut GameState, input: &InputState) {
    let ship = &mut state.ship;
    if input.left {
        ship.heading = wrap_deg(ship.heading - ship.turn_rate);
    }
    if input.right {
        ship.heading = wrap_deg(ship.heading + ship.turn_rate);
    }
    if input.thrust {
        ship.vel = deg_to_vec(ship.heading) * ship.thrust_speed;
    }
    ship.vel *= ship.friction;
    ship.pos += ship.vel;
    // The ship leaves the screen fully before reappearing opposite
    wrap_position(&mut ship.pos, ship.radius * 2.0, state.arena);
}

/// Teleport a position to the opposite edge once it is fully off-arena
fn wrap_position(pos: &mut Vec2, margin: f32, arena: Vec2) {
    if pos.x + margin < 0.0 {
        pos.x = arena.x + margin;
    } else if pos.x - margin > arena.x {
        pos.x = -margin;
    }
    if pos.y + margin < 0.0 {
        pos.y = arena.y + margin;
    } else if pos.y - margin > arena.y {
        pos.y = -margin;
    }
}

/// Replace a destroyed asteroid with 1 to 3 children one tier down
fn split_asteroid(state: &mut GameState, at: Vec2, tier: Tier) {
    let Some(child) = tier.split() else {
        return;
    };
    let count = state.rng.random_range(1..=3);
    for _ in 0..count {
        let offset = Vec2::new(
            state.rng.random_range(-SPLIT_OFFSET_MAX..SPLIT_OFFSET_MAX),
            state.rng.random_range(-SPLIT_OFFSET_MAX..SPLIT_OFFSET_MAX),
        );
        state.spawn_asteroids(1, Some(child), Some(at + offset), None);
    }
}

/// Destroy the ship: hide it, deduct the penalty, scatter debris.
///
/// One explosion per life: a ship already exploded, or re-armed while
/// debris from the previous death is still fading, cannot explode again.
fn explode_ship(state: &mut GameState) {
    if state.ship.exploded || !state.fragments.is_empty() {
        return;
    }
    state.ship.exploded = true;
    state.ship.visual = ShipVisual::Hidden;
    state.ship.vel = Vec2::ZERO;
    state.ship.recolor_at = Some(state.time + SHIP_RECOLOR_DELAY);
    state.stats.score -= state.config.scoring.ship_loss_penalty;
    state.spawn_ship_fragments(SHIP_FRAGMENT_COUNT);
    log::info!("ship destroyed, score {}", state.stats.score);
}
