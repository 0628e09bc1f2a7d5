//! Frame-ready draw commands for the trail overlay.
//!
//! Built once per frame after the physics update, so a surface never sees a
//! half-updated point set.

use glam::Vec2;

use crate::api::config::TrailConfig;
use crate::systems::trail::palette::TrailColor;

/// A connecting line between two nearby points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailLine {
    pub from: Vec2,
    pub to: Vec2,
    pub opacity: f32,
    pub width: f32,
}

/// One glowing star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSprite {
    pub pos: Vec2,
    pub rotation: f32,
    pub size: f32,
    pub color: TrailColor,
    pub opacity: f32,
}

/// Radii multipliers and blur shared by every sprite in a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteStyle {
    pub glow_scale: f32,
    pub star_scale: f32,
    pub core_scale: f32,
    pub bloom_scale: f32,
    pub bloom_blur: f32,
}

impl SpriteStyle {
    pub fn from_config(config: &TrailConfig) -> Self {
        Self {
            glow_scale: config.glow_scale,
            star_scale: config.star_scale,
            core_scale: config.core_scale,
            bloom_scale: config.bloom_scale,
            bloom_blur: config.bloom_blur,
        }
    }
}

impl TrailSprite {
    /// The four star tips in sprite-local space (before rotation).
    pub fn star_tips(&self, style: &SpriteStyle) -> [Vec2; 4] {
        let r = self.size * style.star_scale;
        [Vec2::X * r, Vec2::Y * r, Vec2::NEG_X * r, Vec2::NEG_Y * r]
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrailDrawList {
    pub lines: Vec<TrailLine>,
    pub sprites: Vec<TrailSprite>,
}

impl TrailDrawList {
    pub fn clear(&mut self) {
        self.lines.clear();
        self.sprites.clear();
    }
}
