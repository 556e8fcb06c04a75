//! Game state and core simulation types
//!
//! Everything the per-frame tick reads and mutates lives here. Types are
//! plain data with small helper methods; the update logic is in `tick`.

use glam::Vec2;

use super::collision::Aabb;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active run
    Playing,
    /// Frozen mid-run
    Paused,
    /// Run ended (crash or unshielded obstacle hit)
    GameOver,
}

/// Movement behavior of an obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObstacleKind {
    Static,
    /// Bounces vertically between the world edges
    Oscillating { dir: f32, speed: f32 },
    /// Spins in place; the hitbox stays axis-aligned, the angle is visual
    Rotating { angle: f32, spin: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub rect: Aabb,
    pub kind: ObstacleKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindKind {
    /// Pushes the plane upward (velocity decreases)
    Updraft,
    /// Pushes the plane downward (velocity increases)
    Downdraft,
}

/// A region that nudges the plane's velocity every frame of overlap
#[derive(Debug, Clone, PartialEq)]
pub struct WindZone {
    pub rect: Aabb,
    pub kind: WindKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Obstacle hits destroy the obstacle instead of ending the run
    Shield,
    /// Raises the velocity clamp to 1.5x
    Speed,
    /// Lowers the velocity clamp to 0.5x
    Slow,
}

/// One-shot pickup: applies its timer on first contact, then disappears
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub rect: Aabb,
    pub kind: PowerUpKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusKind {
    Coin,
    Star,
}

impl BonusKind {
    pub fn points(&self) -> u32 {
        match self {
            BonusKind::Coin => COIN_POINTS,
            BonusKind::Star => STAR_POINTS,
        }
    }
}

/// One-shot score pickup
#[derive(Debug, Clone, PartialEq)]
pub struct BonusItem {
    pub rect: Aabb,
    pub kind: BonusKind,
}

/// Timed status effects on the plane
///
/// Each timer counts frames and saturates at zero; the effect is live while
/// its timer is nonzero. A shielded obstacle hit does NOT consume the
/// shield timer - the shield is timed invincibility, not a charge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveEffects {
    pub shield_frames: u32,
    pub boost_frames: u32,
    pub slow_frames: u32,
}

impl ActiveEffects {
    /// Count all timers down by one frame
    pub fn decay(&mut self) {
        self.shield_frames = self.shield_frames.saturating_sub(1);
        self.boost_frames = self.boost_frames.saturating_sub(1);
        self.slow_frames = self.slow_frames.saturating_sub(1);
    }

    pub fn shield_active(&self) -> bool {
        self.shield_frames > 0
    }

    /// Scale applied to the velocity clamp. Boost and slow together cancel.
    pub fn velocity_scale(&self) -> f32 {
        match (self.boost_frames > 0, self.slow_frames > 0) {
            (true, false) => BOOST_SCALE,
            (false, true) => SLOW_SCALE,
            _ => 1.0,
        }
    }

    /// Start (or refresh) the timer for a collected power-up
    pub fn apply(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Shield => self.shield_frames = POWER_UP_DURATION,
            PowerUpKind::Speed => self.boost_frames = POWER_UP_DURATION,
            PowerUpKind::Slow => self.slow_frames = POWER_UP_DURATION,
        }
    }
}

/// The player's plane. x never changes; the world scrolls past instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub rect: Aabb,
    /// Vertical velocity; positive is downward
    pub velocity: f32,
}

impl Plane {
    pub fn new() -> Self {
        Self {
            rect: Aabb::new(PLANE_X, WORLD_HEIGHT / 2.0, PLANE_WIDTH, PLANE_HEIGHT),
            velocity: 0.0,
        }
    }

    /// One frame of physics: accelerate, clamp, integrate by the truncated
    /// velocity (sub-unit drift is deliberately dropped, so a plane creeping
    /// at |v| < 1 holds its row)
    pub fn update(&mut self, lift_held: bool, max_velocity: f32) {
        if lift_held {
            self.velocity -= LIFT;
        } else {
            self.velocity += GRAVITY;
        }
        self.clamp_velocity(max_velocity);
        self.rect.translate(Vec2::new(0.0, self.velocity.trunc()));
    }

    pub fn clamp_velocity(&mut self, max_velocity: f32) {
        self.velocity = self.velocity.clamp(-max_velocity, max_velocity);
    }

    /// Crash test against the world edges
    pub fn out_of_bounds(&self) -> bool {
        self.rect.top() <= 0.0 || self.rect.bottom() >= WORLD_HEIGHT
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::new()
    }
}

/// Discrete occurrence during a tick, for the shell to turn into sound.
/// The sim never touches audio directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PowerUpCollected(PowerUpKind),
    BonusCollected(BonusKind),
    /// An obstacle hit was absorbed by an active shield
    ShieldBlock,
    /// The plane entered a wind zone (fires on the contact frame only)
    WindEnter,
    /// The run ended
    Crashed,
}

/// Complete simulation state, owned exclusively by the frame loop
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed, kept for logging and reproduction
    pub seed: u64,
    /// Frames simulated so far
    pub frame: u64,
    pub phase: GamePhase,
    pub plane: Plane,
    pub obstacles: Vec<Obstacle>,
    pub winds: Vec<WindZone>,
    pub power_ups: Vec<PowerUp>,
    pub bonus_items: Vec<BonusItem>,
    pub effects: ActiveEffects,
    pub score: u32,
    /// Cumulative horizontal travel in world units
    pub travel: f32,
    /// Current score multiplier (1.0 or COMBO_MULTIPLIER)
    pub multiplier: f32,
    /// Frame at which the multiplier resets to 1.0; 0 means not armed
    pub multiplier_expires_at: u64,
    /// Whether the plane overlapped any wind zone last frame
    /// (contact-edge tracking for the gust event)
    pub in_wind: bool,
}

impl GameState {
    /// Fresh state for a new run
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            frame: 0,
            phase: GamePhase::Playing,
            plane: Plane::new(),
            obstacles: Vec::new(),
            winds: Vec::new(),
            power_ups: Vec::new(),
            bonus_items: Vec::new(),
            effects: ActiveEffects::default(),
            score: 0,
            travel: 0.0,
            multiplier: 1.0,
            multiplier_expires_at: 0,
            in_wind: false,
        }
    }
}
