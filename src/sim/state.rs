//! Game state and core simulation types

use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::collision::Hit;
use super::obstacles::ObstacleField;
use super::scenery::Scenery;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Avatar hovering on the title screen, no obstacles
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, simulation frozen until a restart flap
    Dead,
}

/// Something noteworthy that happened during a tick (for audio/HUD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First flap from the title screen
    Started,
    /// Flap applied while playing
    Flapped,
    /// An obstacle was cleared
    Scored { score: u32 },
    /// Run ended
    Died { score: u32, new_best: bool, hit: Hit },
    /// Flap from the death screen started a new run
    Restarted,
}

/// Complete simulation state owned by the driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub avatar: Avatar,
    pub field: ObstacleField,
    pub scenery: Scenery,
    /// Obstacles cleared this run
    pub score: u32,
    /// Highest score seen, loaded from and written back to storage
    pub best_score: u32,
    /// Time spent in the current run (frozen while dead)
    pub run_time_ms: f32,
    /// Sum of clamped frame deltas since construction
    pub clock_ms: f64,
    /// Timestamp of the most recent frame
    pub frame_ms: f64,
    /// Frame timestamp when the last run ended
    pub died_at_ms: f64,
    /// Events raised by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Title-screen state with no obstacles
    pub fn new(config: &GameConfig, best_score: u32, scenery: Scenery) -> Self {
        Self {
            phase: GamePhase::Start,
            avatar: Avatar::spawn(config),
            field: ObstacleField::new(),
            scenery,
            score: 0,
            best_score,
            run_time_ms: 0.0,
            clock_ms: 0.0,
            frame_ms: 0.0,
            died_at_ms: 0.0,
            events: Vec::new(),
        }
    }

    /// Fresh avatar, no obstacles, zero score; best score and clock survive
    pub fn reset_run(&mut self, config: &GameConfig) {
        self.avatar = Avatar::spawn(config);
        self.field.rearm(self.clock_ms, config);
        self.score = 0;
        self.run_time_ms = 0.0;
    }

    /// Whether a flap in the DEAD phase may restart yet.
    ///
    /// Measured on frame timestamps rather than the clamped clock, so a stall
    /// while dead still counts toward the debounce.
    pub fn restart_ready(&self, debounce_ms: f32) -> bool {
        self.phase == GamePhase::Dead && self.frame_ms - self.died_at_ms >= debounce_ms as f64
    }
}
