//! Cadence-driven entity spawning
//!
//! Each category spawns on its own fixed frame interval; the subtype and
//! vertical placement come from the injected RNG, so a seeded run replays
//! identically.

use rand::Rng;

use super::collision::Aabb;
use super::state::{
    BonusItem, BonusKind, GameState, Obstacle, ObstacleKind, PowerUp, PowerUpKind, WindKind,
    WindZone,
};
use crate::consts::*;

/// Run every spawner whose interval divides the current frame
pub fn run_spawners(state: &mut GameState, rng: &mut impl Rng) {
    if state.frame % OBSTACLE_SPAWN_INTERVAL == 0 {
        state.obstacles.push(spawn_obstacle(rng));
    }
    if state.frame % WIND_SPAWN_INTERVAL == 0 {
        state.winds.push(spawn_wind(rng));
    }
    if state.frame % POWER_UP_SPAWN_INTERVAL == 0 {
        state.power_ups.push(spawn_power_up(rng));
    }
    if state.frame % BONUS_SPAWN_INTERVAL == 0 {
        state.bonus_items.push(spawn_bonus(rng));
    }
}

/// Box at the right world edge with a random vertical placement
fn entry_rect(rng: &mut impl Rng, width: f32, height: f32) -> Aabb {
    let y = rng.gen_range(0.0..WORLD_HEIGHT - height);
    Aabb::new(WORLD_WIDTH, y, width, height)
}

pub fn spawn_obstacle(rng: &mut impl Rng) -> Obstacle {
    let rect = entry_rect(rng, OBSTACLE_WIDTH, OBSTACLE_HEIGHT);
    let kind = match rng.gen_range(0..3) {
        0 => ObstacleKind::Static,
        1 => ObstacleKind::Oscillating {
            dir: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
            speed: rng.gen_range(OSCILLATE_SPEED_MIN..OSCILLATE_SPEED_MAX),
        },
        _ => ObstacleKind::Rotating {
            angle: 0.0,
            spin: rng.gen_range(SPIN_SPEED_MIN..SPIN_SPEED_MAX),
        },
    };
    Obstacle { rect, kind }
}

pub fn spawn_wind(rng: &mut impl Rng) -> WindZone {
    let rect = entry_rect(rng, WIND_WIDTH, WIND_HEIGHT);
    let kind = if rng.gen_bool(0.5) {
        WindKind::Updraft
    } else {
        WindKind::Downdraft
    };
    WindZone { rect, kind }
}

pub fn spawn_power_up(rng: &mut impl Rng) -> PowerUp {
    let rect = entry_rect(rng, POWER_UP_SIZE, POWER_UP_SIZE);
    let kind = match rng.gen_range(0..3) {
        0 => PowerUpKind::Shield,
        1 => PowerUpKind::Speed,
        _ => PowerUpKind::Slow,
    };
    PowerUp { rect, kind }
}

pub fn spawn_bonus(rng: &mut impl Rng) -> BonusItem {
    let rect = entry_rect(rng, BONUS_SIZE, BONUS_SIZE);
    let kind = if rng.gen_bool(0.5) {
        BonusKind::Coin
    } else {
        BonusKind::Star
    };
    BonusItem { rect, kind }
}
