//! Skyhop - a single-screen flap-through-the-gaps arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `config`: Tuning constants injected at construction
//! - `persistence`: Best-score storage behind a key-value store
//! - `platform`: Browser/native clock and storage adapters
//!
//! Drawing is not part of this crate; a renderer reads [`sim::Snapshot`] once per frame.

pub mod config;
pub mod persistence;
pub mod platform;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use persistence::{KeyValueStore, MemoryStore, StoreError};
pub use sim::{GamePhase, Simulation, Snapshot};

/// Default tuning constants
///
/// Velocities and accelerations are expressed per reference frame (60 Hz),
/// positions in world pixels with y growing downward.
pub mod consts {
    /// Reference frame length the per-frame constants were tuned against
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Upper bound on a single frame's delta-time
    pub const MAX_DT_MS: f32 = 50.0;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 420.0;
    pub const WORLD_HEIGHT: f32 = 640.0;
    pub const GROUND_Y: f32 = 520.0;
    pub const CEILING_Y: f32 = 0.0;

    /// Avatar defaults
    pub const AVATAR_X: f32 = 90.0;
    pub const AVATAR_START_Y: f32 = 260.0;
    pub const AVATAR_RADIUS: f32 = 14.0;

    /// Gravity (px/frame²)
    pub const GRAVITY: f32 = 0.42;
    /// Terminal fall velocity (px/frame)
    pub const MAX_FALL_VELOCITY: f32 = 12.0;
    /// Velocity set by a flap (negative = upward)
    pub const JUMP_VELOCITY: f32 = -7.6;

    /// Tilt target per unit of vertical velocity (radians)
    pub const TILT_SENSITIVITY: f32 = 0.08;
    /// Nose-up limit (radians, negative = up)
    pub const TILT_UP_LIMIT: f32 = -0.45;
    /// Nose-down limit (radians)
    pub const TILT_DOWN_LIMIT: f32 = 1.4;
    /// Per-tick exponential smoothing factor toward the tilt target
    pub const TILT_EASE: f32 = 0.15;

    /// Idle bob on the start screen
    pub const BOB_AMPLITUDE: f32 = 6.0;
    pub const BOB_FREQUENCY: f32 = 0.005; // radians per ms

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 64.0;
    pub const GAP_HEIGHT: f32 = 150.0;
    /// Minimum distance between the gap and ceiling/ground
    pub const GAP_MARGIN: f32 = 60.0;
    /// Leftward scroll speed (px/frame)
    pub const OBSTACLE_SPEED: f32 = 2.6;
    pub const SPAWN_INTERVAL_MS: f32 = 1500.0;
    /// Delay before the first obstacle of a run
    pub const SPAWN_GRACE_MS: f32 = 800.0;
    /// Obstacles are retired once their right edge is this far past the left edge
    pub const RETIRE_MARGIN: f32 = 20.0;

    /// Minimum time in DEAD before a flap restarts the run
    pub const RESTART_DEBOUNCE_MS: f32 = 600.0;

    /// Background scenery
    pub const STAR_COUNT: usize = 40;
    pub const CLOUD_COUNT: usize = 6;
}

/// Convert a delta-time in milliseconds to reference frames
#[inline]
pub fn frames_from_ms(dt_ms: f32) -> f32 {
    dt_ms / consts::FRAME_MS
}
