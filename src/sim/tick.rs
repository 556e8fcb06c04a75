//! Fixed timestep simulation tick
//!
//! One call = one frame. Ordering within a frame is fixed: plane physics,
//! then spawning, then entity updates and culls, then collision resolution,
//! then the score/multiplier clock. Rendering and audio happen outside.

use glam::Vec2;
use rand::Rng;

use super::spawn::run_spawners;
use super::state::{GameEvent, GamePhase, GameState, ObstacleKind, WindKind};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Lift key currently held
    pub lift: bool,
    /// Pause toggle (one-shot, cleared by the caller after each frame)
    pub pause: bool,
}

/// Advance the game state by one frame.
///
/// All randomness comes through `rng` so callers control determinism.
/// Returns the discrete events of the frame for the shell to sonify.
pub fn tick(state: &mut GameState, input: &TickInput, rng: &mut impl Rng) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return events;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return events,
        GamePhase::Playing => {}
    }

    state.frame += 1;

    // Multiplier expiry: resets exactly COMBO_MULTIPLIER_DURATION frames
    // after the most recent pickup
    if state.multiplier_expires_at != 0 && state.frame >= state.multiplier_expires_at {
        state.multiplier = 1.0;
        state.multiplier_expires_at = 0;
    }

    // Count down status effects
    state.effects.decay();

    // Plane physics: lift vs gravity, clamp scaled by status, integrate
    let max_velocity = MAX_VELOCITY * state.effects.velocity_scale();
    state.plane.update(input.lift, max_velocity);

    if state.plane.out_of_bounds() {
        return end_run(state, &mut events);
    }

    // Spawn new entities on their cadences
    run_spawners(state, rng);

    // Scroll everything leftward and apply per-kind obstacle motion
    let scroll = Vec2::new(-SCROLL_SPEED, 0.0);
    for obstacle in &mut state.obstacles {
        obstacle.rect.translate(scroll);
        match obstacle.kind {
            ObstacleKind::Static => {}
            ObstacleKind::Oscillating {
                ref mut dir,
                speed,
            } => {
                obstacle.rect.translate(Vec2::new(0.0, *dir * speed));
                // Reverse on edge contact; the next frame moves back inward
                if obstacle.rect.top() <= 0.0 {
                    *dir = 1.0;
                } else if obstacle.rect.bottom() >= WORLD_HEIGHT {
                    *dir = -1.0;
                }
            }
            ObstacleKind::Rotating { ref mut angle, spin } => {
                *angle = (*angle + spin) % 360.0;
            }
        }
    }
    for wind in &mut state.winds {
        wind.rect.translate(scroll);
    }
    for power_up in &mut state.power_ups {
        power_up.rect.translate(scroll);
    }
    for bonus in &mut state.bonus_items {
        bonus.rect.translate(scroll);
    }

    // Cull everything fully past the left edge
    state.obstacles.retain(|o| o.rect.right() > 0.0);
    state.winds.retain(|w| w.rect.right() > 0.0);
    state.power_ups.retain(|p| p.rect.right() > 0.0);
    state.bonus_items.retain(|b| b.rect.right() > 0.0);

    let plane_rect = state.plane.rect;

    // Wind: a nudge per overlapping zone, every frame the overlap persists
    let mut touching_wind = false;
    for wind in &state.winds {
        if plane_rect.intersects(&wind.rect) {
            touching_wind = true;
            match wind.kind {
                WindKind::Updraft => state.plane.velocity -= WIND_PUSH,
                WindKind::Downdraft => state.plane.velocity += WIND_PUSH,
            }
        }
    }
    if touching_wind {
        state.plane.clamp_velocity(max_velocity);
        if !state.in_wind {
            events.push(GameEvent::WindEnter);
        }
    }
    state.in_wind = touching_wind;

    // Power-ups are one-shot: collect on first overlap, remove immediately
    let mut collected = Vec::new();
    state.power_ups.retain(|power_up| {
        if plane_rect.intersects(&power_up.rect) {
            collected.push(power_up.kind);
            false
        } else {
            true
        }
    });
    for kind in collected {
        state.effects.apply(kind);
        state.multiplier = COMBO_MULTIPLIER;
        state.multiplier_expires_at = state.frame + COMBO_MULTIPLIER_DURATION;
        log::debug!("power-up collected: {:?}", kind);
        events.push(GameEvent::PowerUpCollected(kind));
    }
    // A fresh slow status moves the clamp down; velocity must obey it on
    // the same frame, not one frame late
    state
        .plane
        .clamp_velocity(MAX_VELOCITY * state.effects.velocity_scale());

    // Bonus items are one-shot score
    let mut banked = Vec::new();
    state.bonus_items.retain(|bonus| {
        if plane_rect.intersects(&bonus.rect) {
            banked.push(bonus.kind);
            false
        } else {
            true
        }
    });
    for kind in banked {
        state.score += (kind.points() as f32 * state.multiplier) as u32;
        events.push(GameEvent::BonusCollected(kind));
    }

    // Obstacles: a shielded hit destroys the obstacle, an unshielded hit
    // ends the run. The shield timer is not consumed by the block.
    let shielded = state.effects.shield_active();
    let mut crashed = false;
    state.obstacles.retain(|obstacle| {
        if crashed || !plane_rect.intersects(&obstacle.rect) {
            return true;
        }
        if shielded {
            events.push(GameEvent::ShieldBlock);
            false
        } else {
            crashed = true;
            true
        }
    });
    if crashed {
        return end_run(state, &mut events);
    }

    // Score/multiplier clock: distance accrues every surviving frame
    state.travel += SCROLL_SPEED;
    state.score += (DISTANCE_POINTS * state.multiplier) as u32;

    events
}

fn end_run(state: &mut GameState, events: &mut Vec<GameEvent>) -> Vec<GameEvent> {
    state.phase = GamePhase::GameOver;
    events.push(GameEvent::Crashed);
    log::info!(
        "run over: frame {}, score {}, seed {}",
        state.frame,
        state.score,
        state.seed
    );
    std::mem::take(events)
}
