//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, injected by the caller
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use state::{
    ActiveEffects, BonusItem, BonusKind, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind,
    Plane, PowerUp, PowerUpKind, WindKind, WindZone,
};
pub use tick::{tick, TickInput};
