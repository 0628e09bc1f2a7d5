//! A single trail point and its per-frame physics.

use glam::Vec2;

use super::palette::{self, TrailColor};
use super::rng::Rng;
use crate::api::config::TrailConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Monotonic; grows by `age_step` every frame.
    pub age: f32,
    pub size: f32,
    pub color: TrailColor,
    pub rotation: f32,
}

impl TrailPoint {
    /// Spawn near `at` with random jitter, velocity, size, color and rotation.
    pub fn spawn(at: Vec2, config: &TrailConfig, rng: &mut Rng) -> Self {
        let size = config.size_min + rng.next_f32() * config.size_range;
        let color = palette::pick(&config.palette, rng);
        TrailPoint {
            pos: at + Vec2::new(
                rng.centered(config.spawn_jitter),
                rng.centered(config.spawn_jitter),
            ),
            vel: Vec2::new(
                rng.centered(config.spawn_speed),
                rng.centered(config.spawn_speed),
            ),
            age: 0.0,
            size,
            color,
            rotation: rng.next_f32() * std::f32::consts::TAU,
        }
    }

    /// Advance one frame. Returns false once the point has reached its lifetime.
    pub fn tick(&mut self, config: &TrailConfig, rng: &mut Rng) -> bool {
        self.age += config.age_step;

        self.vel.x += rng.centered(config.turbulence);
        self.vel.y += rng.centered(config.turbulence);
        self.rotation += config.spin;

        self.pos += self.vel * config.velocity_scale;
        self.vel *= config.damping;

        self.age < config.lifetime
    }

    /// Linear fade over the remaining lifetime, 1 at birth and 0 at retirement.
    pub fn opacity(&self, lifetime: f32) -> f32 {
        if lifetime <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / lifetime).max(0.0)
    }
}
