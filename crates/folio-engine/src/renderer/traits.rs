//! Drawing contract for the trail overlay.
//!
//! The browser bridge implements it over a 2D canvas context; tests
//! implement it with a recorder.

use super::draw_list::{SpriteStyle, TrailLine, TrailSprite};
use crate::api::types::Viewport;
use crate::systems::trail::palette::TrailColor;

pub trait TrailSurface {
    /// Wipe the whole overlay. Called once at the start of every frame.
    fn clear(&mut self, viewport: &Viewport);

    /// Stroke a connecting line in `color` at the line's own opacity/width.
    fn stroke_line(&mut self, line: &TrailLine, color: TrailColor);

    /// Radial glow, rotated 4-point star, inner glow and bloom for one point.
    fn draw_sprite(&mut self, sprite: &TrailSprite, style: &SpriteStyle);
}
