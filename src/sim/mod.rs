//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through frame timestamps passed to `tick`
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod avatar;
pub mod clock;
pub mod collision;
pub mod obstacles;
pub mod scenery;
pub mod state;
pub mod tick;

pub use avatar::Avatar;
pub use clock::{Clock, ManualClock, Ticker};
pub use collision::{Hit, Rect, circle_rect_overlap, collides, hit_kind};
pub use obstacles::{Obstacle, ObstacleField};
pub use scenery::{Cloud, Scenery, Star};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{Simulation, Snapshot};
