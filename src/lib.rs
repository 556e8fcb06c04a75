//! Paper Glider - a side-scrolling paper airplane arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, game state)
//! - `render`: Terminal rendering (crossterm)
//! - `audio`: Procedural sound effects (rodio + fundsp)
//! - `settings`: User preferences with JSON persistence

pub mod audio;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Frame budget (~30 FPS); physics constants below are tuned per frame
    pub const FRAME_MS: u64 = 33;

    /// World dimensions (simulation space, independent of terminal size)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Plane defaults - x is fixed, only y moves
    pub const PLANE_X: f32 = 100.0;
    pub const PLANE_WIDTH: f32 = 50.0;
    pub const PLANE_HEIGHT: f32 = 30.0;

    /// Downward acceleration per frame while the lift key is released
    pub const GRAVITY: f32 = 0.5;
    /// Upward acceleration per frame while the lift key is held
    pub const LIFT: f32 = 0.3;
    /// Velocity clamp at neutral status
    pub const MAX_VELOCITY: f32 = 5.0;
    /// Velocity clamp scale while speed-boosted
    pub const BOOST_SCALE: f32 = 1.5;
    /// Velocity clamp scale while slowed
    pub const SLOW_SCALE: f32 = 0.5;

    /// Leftward displacement applied to every world entity each frame
    pub const SCROLL_SPEED: f32 = 5.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    pub const OBSTACLE_HEIGHT: f32 = 200.0;
    pub const OBSTACLE_SPAWN_INTERVAL: u64 = 90;
    /// Vertical speed range for oscillating obstacles
    pub const OSCILLATE_SPEED_MIN: f32 = 1.0;
    pub const OSCILLATE_SPEED_MAX: f32 = 3.0;
    /// Degrees per frame range for rotating obstacles
    pub const SPIN_SPEED_MIN: f32 = 2.0;
    pub const SPIN_SPEED_MAX: f32 = 8.0;

    /// Wind zone defaults
    pub const WIND_WIDTH: f32 = 120.0;
    pub const WIND_HEIGHT: f32 = 140.0;
    pub const WIND_SPAWN_INTERVAL: u64 = 240;
    /// Velocity nudge applied every frame the plane overlaps a wind zone
    pub const WIND_PUSH: f32 = 0.4;

    /// Power-up defaults
    pub const POWER_UP_SIZE: f32 = 30.0;
    pub const POWER_UP_SPAWN_INTERVAL: u64 = 420;
    /// Frames a shield / speed / slow effect stays active after pickup
    pub const POWER_UP_DURATION: u32 = 300;

    /// Bonus item defaults
    pub const BONUS_SIZE: f32 = 24.0;
    pub const BONUS_SPAWN_INTERVAL: u64 = 180;
    pub const COIN_POINTS: u32 = 50;
    pub const STAR_POINTS: u32 = 100;

    /// Base score gained per frame from forward travel
    pub const DISTANCE_POINTS: f32 = 2.0;
    /// Score multiplier armed by any power-up pickup
    pub const COMBO_MULTIPLIER: f32 = 1.5;
    /// Frames the multiplier stays armed after the most recent pickup
    pub const COMBO_MULTIPLIER_DURATION: u64 = 600;
}
