//! Obstacle pairs and their lifecycle
//!
//! Obstacles enter at the right edge, scroll left, get scored once the avatar
//! clears them, and are retired once fully off the left edge.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::frames_from_ms;

/// An upper/lower obstacle pair with a gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    x: f32,
    width: f32,
    gap_start: f32,
    gap_end: f32,
    scored: bool,
}

impl Obstacle {
    pub fn new(x: f32, width: f32, gap_start: f32, gap_height: f32) -> Self {
        Self {
            x,
            width,
            gap_start,
            gap_end: gap_start + gap_height,
            scored: false,
        }
    }

    /// Left edge
    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Bottom of the upper body
    pub fn gap_start(&self) -> f32 {
        self.gap_start
    }

    /// Top of the lower body
    pub fn gap_end(&self) -> f32 {
        self.gap_end
    }

    pub fn gap_height(&self) -> f32 {
        self.gap_end - self.gap_start
    }

    pub fn scored(&self) -> bool {
        self.scored
    }
}

/// Owns the live obstacles and spawn timing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    last_spawn_ms: f64,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn last_spawn_ms(&self) -> f64 {
        self.last_spawn_ms
    }

    /// Place an obstacle directly (replays, scripted scenarios)
    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Drop all obstacles and schedule the first spawn `grace_ms` after `now_ms`
    pub fn rearm(&mut self, now_ms: f64, config: &GameConfig) {
        self.obstacles.clear();
        self.last_spawn_ms =
            now_ms - f64::from(config.spawn_interval_ms) + f64::from(config.spawn_grace_ms);
    }

    /// Spawn a new obstacle at the right edge if the spawn interval has elapsed.
    ///
    /// Returns true when an obstacle was added.
    pub fn maybe_spawn<R: Rng>(&mut self, now_ms: f64, config: &GameConfig, rng: &mut R) -> bool {
        if now_ms - self.last_spawn_ms < f64::from(config.spawn_interval_ms) {
            return false;
        }
        let (min_start, max_start) = config.gap_start_range();
        let gap_start = if max_start > min_start {
            rng.random_range(min_start..=max_start)
        } else {
            min_start
        };
        self.obstacles.push(Obstacle::new(
            config.world_width,
            config.obstacle_width,
            gap_start,
            config.gap_height,
        ));
        self.last_spawn_ms = now_ms;
        log::debug!("Spawned obstacle, gap {:.1}..{:.1}", gap_start, gap_start + config.gap_height);
        true
    }

    /// Scroll every obstacle left and retire the ones fully past the left edge
    pub fn advance(&mut self, speed: f32, dt_ms: f32, retire_margin: f32) {
        let shift = speed * frames_from_ms(dt_ms);
        for obstacle in &mut self.obstacles {
            obstacle.x -= shift;
        }
        self.obstacles.retain(|o| o.right() >= -retire_margin);
    }

    /// Mark obstacles whose right edge has passed `avatar_x` as scored.
    ///
    /// Returns the number of obstacles scored by this call.
    pub fn score_check(&mut self, avatar_x: f32) -> u32 {
        let mut newly_scored = 0;
        for obstacle in self.obstacles.iter_mut().filter(|o| !o.scored) {
            if obstacle.right() < avatar_x {
                obstacle.scored = true;
                newly_scored += 1;
            }
        }
        newly_scored
    }
}
