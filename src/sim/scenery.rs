//! Procedural background scenery
//!
//! Purely decorative; never affects gameplay. Generated from the simulation's
//! seeded RNG so a given seed always yields the same sky.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::frames_from_ms;

/// Clouds drift at this fraction of the obstacle speed
const CLOUD_PARALLAX: f32 = 0.25;
/// Widest cloud sprite at scale 1.0, used for horizontal wraparound
const CLOUD_BASE_WIDTH: f32 = 80.0;

/// A static background star
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    /// Offset into the twinkle cycle (radians)
    pub twinkle_phase: f32,
}

/// A drifting cloud
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub scale: f32,
    /// Multiplier on the base parallax speed
    pub speed_factor: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenery {
    pub stars: Vec<Star>,
    pub clouds: Vec<Cloud>,
}

impl Scenery {
    /// Scatter stars over the sky and clouds over the upper half of the world
    pub fn generate<R: Rng>(
        config: &GameConfig,
        star_count: usize,
        cloud_count: usize,
        rng: &mut R,
    ) -> Self {
        let sky_bottom = config.ground_y.max(config.ceiling_y + 1.0);
        let stars = (0..star_count)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..config.world_width),
                    rng.random_range(config.ceiling_y..sky_bottom),
                ),
                size: rng.random_range(0.5..2.0),
                twinkle_phase: rng.random_range(0.0..std::f32::consts::TAU),
            })
            .collect();

        let cloud_bottom = config.ceiling_y + (sky_bottom - config.ceiling_y) * 0.5;
        let clouds = (0..cloud_count)
            .map(|_| Cloud {
                pos: Vec2::new(
                    rng.random_range(0.0..config.world_width),
                    rng.random_range(config.ceiling_y..cloud_bottom),
                ),
                scale: rng.random_range(0.6..1.4),
                speed_factor: rng.random_range(0.7..1.3),
            })
            .collect();

        Self { stars, clouds }
    }

    /// Scroll clouds left, wrapping them back in from the right edge
    pub fn drift(&mut self, obstacle_speed: f32, dt_ms: f32, world_width: f32) {
        let base = obstacle_speed * CLOUD_PARALLAX * frames_from_ms(dt_ms);
        for cloud in &mut self.clouds {
            cloud.pos.x -= base * cloud.speed_factor;
            let width = CLOUD_BASE_WIDTH * cloud.scale;
            if cloud.pos.x < -width {
                cloud.pos.x += world_width + width;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_generate_is_deterministic() {
        let config = GameConfig::default();
        let a = Scenery::generate(&config, 10, 3, &mut Pcg32::seed_from_u64(42));
        let b = Scenery::generate(&config, 10, 3, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a.stars, b.stars);
        assert_eq!(a.clouds, b.clouds);
    }

    #[test]
    fn test_generate_within_world() {
        let config = GameConfig::default();
        let scenery = Scenery::generate(&config, 50, 10, &mut Pcg32::seed_from_u64(3));
        assert_eq!(scenery.stars.len(), 50);
        assert_eq!(scenery.clouds.len(), 10);
        for star in &scenery.stars {
            assert!(star.pos.x >= 0.0 && star.pos.x < config.world_width);
            assert!(star.pos.y >= config.ceiling_y && star.pos.y < config.ground_y);
        }
        for cloud in &scenery.clouds {
            assert!(cloud.pos.y < config.ground_y / 2.0);
        }
    }

    #[test]
    fn test_cloud_wraps() {
        let mut scenery = Scenery {
            stars: Vec::new(),
            clouds: vec![Cloud {
                pos: Vec2::new(-79.0, 50.0),
                scale: 1.0,
                speed_factor: 1.0,
            }],
        };
        // 2.6 * 0.25 * 4 = 2.6px → x = -81.6, past the -80 wrap line
        scenery.drift(2.6, FRAME_MS * 4.0, 420.0);
        let x = scenery.clouds[0].pos.x;
        assert!((x - (-81.6 + 500.0)).abs() < 0.01);
    }
}
