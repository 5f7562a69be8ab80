//! Headless demo driver
//!
//! Runs the simulation at roughly 60 fps with a simple autopilot standing
//! in for a player: steer toward the nearest threat and fire when lined
//! up. Pass a JSON config path as the first argument to override the
//! default campaign. Useful for soak-testing the sim without a renderer.

use std::time::{Duration, Instant};
use std::{env, fs, process, thread};

use astro_arena::{Game, GameConfig, InputState, TickOutcome, wrap_deg};

const FRAME: Duration = Duration::from_millis(16);

fn main() {
    env_logger::init();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            log::error!("config: {err}");
            process::exit(1);
        }
    };
    let mut game = match Game::new(config) {
        Ok(game) => game,
        Err(err) => {
            log::error!("config: {err}");
            process::exit(1);
        }
    };
    game.on_complete(|score| log::info!("campaign complete, final score {score}"));

    let mut last = Instant::now();
    loop {
        let now = Instant::now();
        let elapsed = now.duration_since(last).as_secs_f32();
        last = now;

        game.set_input(autopilot(&game));
        if game.tick(elapsed) == TickOutcome::Complete {
            break;
        }
        thread::sleep(FRAME);
    }

    let stats = game.stats();
    println!("cleared level {} with score {}", stats.level, stats.score);
}

fn load_config() -> Result<GameConfig, String> {
    match env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path).map_err(|e| format!("{path}: {e}"))?;
            serde_json::from_str(&text).map_err(|e| format!("{path}: {e}"))
        }
        None => Ok(GameConfig::default_campaign()),
    }
}

/// Turn toward the nearest asteroid or UFO; fire once roughly lined up.
///
/// Holding fire with no target left still re-arms a destroyed ship.
fn autopilot(game: &Game) -> InputState {
    let state = game.state();
    let ship = &state.ship;

    let target = state
        .asteroids
        .iter()
        .map(|a| a.pos)
        .chain(state.ufos.iter().map(|u| u.pos))
        .min_by(|a, b| {
            a.distance_squared(ship.pos)
                .total_cmp(&b.distance_squared(ship.pos))
        });
    let Some(target) = target else {
        return InputState {
            fire: true,
            ..InputState::default()
        };
    };

    let to_target = target - ship.pos;
    let desired = wrap_deg(to_target.y.atan2(to_target.x).to_degrees());
    let delta = shortest_delta(ship.heading, desired);
    InputState {
        left: delta < -2.5,
        right: delta > 2.5,
        thrust: false,
        fire: delta.abs() < 10.0,
    }
}

/// Signed shortest rotation from one heading to another, in (-180, 180]
fn shortest_delta(from: f32, to: f32) -> f32 {
    let mut delta = (to - from) % 360.0;
    if delta > 180.0 {
        delta -= 360.0;
    }
    if delta < -180.0 {
        delta += 360.0;
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortest_delta() {
        assert_eq!(shortest_delta(0.0, 10.0), 10.0);
        assert_eq!(shortest_delta(10.0, 0.0), -10.0);
        assert_eq!(shortest_delta(350.0, 10.0), 20.0);
        assert_eq!(shortest_delta(10.0, 350.0), -20.0);
        assert_eq!(shortest_delta(0.0, 180.0), 180.0);
    }
}
