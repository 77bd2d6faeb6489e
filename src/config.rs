//! Game tuning configuration
//!
//! A static set of named constants injected into the simulation at construction.
//! Loaded from JSON when embedding layers want to override defaults.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tuning constants for a simulation instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    pub ground_y: f32,
    pub ceiling_y: f32,

    // === Avatar ===
    pub avatar_x: f32,
    pub avatar_start_y: f32,
    pub avatar_radius: f32,
    pub gravity: f32,
    pub max_fall_velocity: f32,
    pub jump_velocity: f32,
    pub tilt_sensitivity: f32,
    pub tilt_up_limit: f32,
    pub tilt_down_limit: f32,
    pub tilt_ease: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub gap_height: f32,
    pub gap_margin: f32,
    pub obstacle_speed: f32,
    pub spawn_interval_ms: f32,
    pub spawn_grace_ms: f32,
    pub retire_margin: f32,

    // === Timing ===
    pub max_dt_ms: f32,
    pub restart_debounce_ms: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ground_y: GROUND_Y,
            ceiling_y: CEILING_Y,

            avatar_x: AVATAR_X,
            avatar_start_y: AVATAR_START_Y,
            avatar_radius: AVATAR_RADIUS,
            gravity: GRAVITY,
            max_fall_velocity: MAX_FALL_VELOCITY,
            jump_velocity: JUMP_VELOCITY,
            tilt_sensitivity: TILT_SENSITIVITY,
            tilt_up_limit: TILT_UP_LIMIT,
            tilt_down_limit: TILT_DOWN_LIMIT,
            tilt_ease: TILT_EASE,

            obstacle_width: OBSTACLE_WIDTH,
            gap_height: GAP_HEIGHT,
            gap_margin: GAP_MARGIN,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            spawn_grace_ms: SPAWN_GRACE_MS,
            retire_margin: RETIRE_MARGIN,

            max_dt_ms: MAX_DT_MS,
            restart_debounce_ms: RESTART_DEBOUNCE_MS,
        }
    }
}

/// Reasons a configuration cannot drive a simulation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A field is NaN or infinite
    NonFinite(&'static str),
    /// A field that must be strictly positive is not
    NotPositive(&'static str, f32),
    /// Flap velocity must point upward
    JumpNotUpward(f32),
    /// Ground must lie below the ceiling
    InvertedBounds { ceiling_y: f32, ground_y: f32 },
    /// Gap plus both margins does not fit between ceiling and ground
    GapDoesNotFit { min_start: f32, max_start: f32 },
    /// Avatar column lies outside the world
    AvatarOutsideWorld(f32),
    /// Ground line lies below the bottom of the world
    GroundOutsideWorld { ground_y: f32, world_height: f32 },
    /// Tilt limits are reversed
    InvertedTilt { up: f32, down: f32 },
    /// JSON document could not be parsed
    Parse(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ConfigError::NonFinite(field) => write!(f, "{field} must be finite"),
            ConfigError::NotPositive(field, v) => write!(f, "{field} must be > 0 (got {v})"),
            ConfigError::JumpNotUpward(v) => {
                write!(f, "jump_velocity must be negative (upward), got {v}")
            }
            ConfigError::InvertedBounds { ceiling_y, ground_y } => write!(
                f,
                "ground_y ({ground_y}) must be below ceiling_y ({ceiling_y})"
            ),
            ConfigError::GapDoesNotFit {
                min_start,
                max_start,
            } => write!(
                f,
                "gap does not fit between margins (gap start range {min_start}..={max_start})"
            ),
            ConfigError::AvatarOutsideWorld(x) => {
                write!(f, "avatar_x ({x}) lies outside the world")
            }
            ConfigError::GroundOutsideWorld {
                ground_y,
                world_height,
            } => write!(
                f,
                "ground_y ({ground_y}) must not exceed world_height ({world_height})"
            ),
            ConfigError::InvertedTilt { up, down } => {
                write!(f, "tilt_up_limit ({up}) must be <= tilt_down_limit ({down})")
            }
            ConfigError::Parse(msg) => write!(f, "invalid config JSON: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Inclusive range the gap start is drawn from
    pub fn gap_start_range(&self) -> (f32, f32) {
        (
            self.ceiling_y + self.gap_margin,
            self.ground_y - self.gap_height - self.gap_margin,
        )
    }

    /// Check that the configuration describes a playable world
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("ground_y", self.ground_y),
            ("ceiling_y", self.ceiling_y),
            ("avatar_x", self.avatar_x),
            ("avatar_start_y", self.avatar_start_y),
            ("avatar_radius", self.avatar_radius),
            ("gravity", self.gravity),
            ("max_fall_velocity", self.max_fall_velocity),
            ("jump_velocity", self.jump_velocity),
            ("tilt_sensitivity", self.tilt_sensitivity),
            ("tilt_up_limit", self.tilt_up_limit),
            ("tilt_down_limit", self.tilt_down_limit),
            ("tilt_ease", self.tilt_ease),
            ("obstacle_width", self.obstacle_width),
            ("gap_height", self.gap_height),
            ("gap_margin", self.gap_margin),
            ("obstacle_speed", self.obstacle_speed),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("spawn_grace_ms", self.spawn_grace_ms),
            ("retire_margin", self.retire_margin),
            ("max_dt_ms", self.max_dt_ms),
            ("restart_debounce_ms", self.restart_debounce_ms),
        ];
        if let Some(&(name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite(name));
        }

        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("avatar_radius", self.avatar_radius),
            ("max_fall_velocity", self.max_fall_velocity),
            ("obstacle_width", self.obstacle_width),
            ("gap_height", self.gap_height),
            ("obstacle_speed", self.obstacle_speed),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("max_dt_ms", self.max_dt_ms),
        ];
        if let Some(&(name, v)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(ConfigError::NotPositive(name, v));
        }

        if self.jump_velocity >= 0.0 {
            return Err(ConfigError::JumpNotUpward(self.jump_velocity));
        }
        if self.ground_y <= self.ceiling_y {
            return Err(ConfigError::InvertedBounds {
                ceiling_y: self.ceiling_y,
                ground_y: self.ground_y,
            });
        }
        if self.ground_y > self.world_height {
            return Err(ConfigError::GroundOutsideWorld {
                ground_y: self.ground_y,
                world_height: self.world_height,
            });
        }
        let (min_start, max_start) = self.gap_start_range();
        if max_start < min_start {
            return Err(ConfigError::GapDoesNotFit {
                min_start,
                max_start,
            });
        }
        if self.avatar_x < 0.0 || self.avatar_x > self.world_width {
            return Err(ConfigError::AvatarOutsideWorld(self.avatar_x));
        }
        if self.tilt_up_limit > self.tilt_down_limit {
            return Err(ConfigError::InvertedTilt {
                up: self.tilt_up_limit,
                down: self.tilt_down_limit,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_gap_start_range() {
        let config = GameConfig::default();
        let (min, max) = config.gap_start_range();
        assert!((min - 60.0).abs() < 0.001);
        assert!((max - 310.0).abs() < 0.001);
    }

    #[test]
    fn test_rejects_gap_too_tall() {
        let config = GameConfig {
            gap_height: 450.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GapDoesNotFit { .. })
        ));
    }

    #[test]
    fn test_rejects_ground_below_world() {
        let config = GameConfig {
            world_height: 480.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::GroundOutsideWorld {
                ground_y: 520.0,
                world_height: 480.0,
            })
        );

        // Ground flush with the bottom edge is fine
        let config = GameConfig {
            world_height: 520.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_downward_jump() {
        let config = GameConfig {
            jump_velocity: 3.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::JumpNotUpward(3.0)));
    }

    #[test]
    fn test_rejects_non_finite() {
        let config = GameConfig {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NonFinite("gravity")));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let config = GameConfig {
            spawn_interval_ms: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive("spawn_interval_ms", 0.0))
        );
    }

    #[test]
    fn test_from_json_partial() {
        let config = GameConfig::from_json(r#"{ "gravity": 0.5, "gap_height": 120 }"#).unwrap();
        assert!((config.gravity - 0.5).abs() < f32::EPSILON);
        assert!((config.gap_height - 120.0).abs() < f32::EPSILON);
        // Untouched fields keep defaults
        assert!((config.obstacle_speed - OBSTACLE_SPEED).abs() < f32::EPSILON);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            GameConfig::from_json("{ gravity: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_json_invalid_values() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "avatar_x": 9000 }"#),
            Err(ConfigError::AvatarOutsideWorld(_))
        ));
    }
}
