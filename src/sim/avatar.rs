//! Player avatar and its vertical physics

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::frames_from_ms;

/// The player-controlled avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Fixed horizontal column
    pub x: f32,
    pub y: f32,
    /// Vertical velocity in px/frame (positive = downward)
    pub vy: f32,
    /// Rotation in radians (negative = nose up)
    pub tilt: f32,
    pub alive: bool,
}

impl Avatar {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            vy: 0.0,
            tilt: 0.0,
            alive: true,
        }
    }

    /// Fresh avatar at the configured start position
    pub fn spawn(config: &GameConfig) -> Self {
        Self::new(config.avatar_x, config.avatar_start_y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Apply gravity, clamp to terminal velocity, then move.
    ///
    /// Gravity and velocity are scaled by `dt_ms` relative to the 60 Hz
    /// reference frame. Tilt easing is applied once per call with a fixed
    /// factor, so its settle time still depends on the frame rate.
    pub fn integrate(&mut self, gravity: f32, max_fall_velocity: f32, dt_ms: f32, config: &GameConfig) {
        if !self.alive {
            return;
        }
        let frames = frames_from_ms(dt_ms);
        self.vy = (self.vy + gravity * frames).min(max_fall_velocity);
        self.y += self.vy * frames;

        let target = (self.vy * config.tilt_sensitivity)
            .clamp(config.tilt_up_limit, config.tilt_down_limit);
        self.tilt += (target - self.tilt) * config.tilt_ease;
    }

    /// Set upward velocity and snap the tilt nose-up
    pub fn flap(&mut self, jump_velocity: f32, tilt_up_limit: f32) {
        if !self.alive {
            return;
        }
        self.vy = jump_velocity;
        self.tilt = tilt_up_limit;
    }

    /// Idle hover used on the start screen
    pub fn bob(&mut self, base_y: f32, time_ms: f64, amplitude: f32, frequency: f32) {
        self.y = base_y + (time_ms * f64::from(frequency)).sin() as f32 * amplitude;
        self.vy = 0.0;
        self.tilt = 0.0;
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }
}
