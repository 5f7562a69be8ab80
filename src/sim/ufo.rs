//! UFO waypoint navigation
//!
//! Each UFO cycles through its waypoint tour: travel toward the current
//! waypoint, rest there for a level-configured pause, then move on. Arrival
//! is judged on the x coordinate alone, which keeps the craft drifting in a
//! loose, wandering path rather than snapping to points.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Ufo, UfoNav};
use crate::config::LevelConfig;
use crate::consts::UFO_ARRIVAL_TOLERANCE;

/// Advance one UFO by one frame
pub fn navigate(ufo: &mut Ufo, now: f32, level: &LevelConfig, rng: &mut Pcg32) {
    if let UfoNav::Paused { until } = ufo.nav {
        if now < until {
            return;
        }
        ufo.nav = UfoNav::Traveling;
    }

    let dest = ufo.waypoints[ufo.curr_point];
    if (ufo.pos.x - dest.x).abs() < UFO_ARRIVAL_TOLERANCE {
        ufo.curr_point = (ufo.curr_point + 1) % ufo.waypoints.len();
        let (lo, hi) = level.ufo_pause;
        let rest = if hi > lo { rng.random_range(lo..hi) } else { lo };
        ufo.nav = UfoNav::Paused { until: now + rest };
        return;
    }

    let to_dest = dest - ufo.pos;
    let bearing = to_dest.y.atan2(to_dest.x);
    ufo.pos.x += bearing.cos() * ufo.speed;
    ufo.pos.y += bearing.sin() * ufo.speed;
}
