//! 2D canvas backend for the pointer trail.

use std::f64::consts::TAU;

use folio_engine::{SpriteStyle, TrailColor, TrailLine, TrailSprite, TrailSurface, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Backing-store size last applied, to skip redundant resizes.
    backing: (u32, u32),
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            ctx,
            backing: (0, 0),
        })
    }

    /// Match the backing store to the viewport and reset the transform so one
    /// unit is one CSS pixel.
    fn fit(&mut self, viewport: &Viewport) -> Result<(), JsValue> {
        let backing = viewport.backing_size();
        if backing != self.backing {
            self.canvas.set_width(backing.0);
            self.canvas.set_height(backing.1);
            let style = self.canvas.style();
            style.set_property("width", &format!("{}px", viewport.width))?;
            style.set_property("height", &format!("{}px", viewport.height))?;
            self.backing = backing;
        }
        self.ctx
            .set_transform(viewport.dpr, 0.0, 0.0, viewport.dpr, 0.0, 0.0)
    }

    fn paint_sprite(&self, sprite: &TrailSprite, style: &SpriteStyle) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let size = sprite.size as f64;
        let opacity = sprite.opacity;

        ctx.save();
        ctx.translate(sprite.pos.x as f64, sprite.pos.y as f64)?;
        ctx.rotate(sprite.rotation as f64)?;

        // Outer glow, shaped as a four-point star.
        let glow = ctx.create_radial_gradient(0.0, 0.0, 0.0, 0.0, 0.0, size * style.glow_scale as f64)?;
        glow.add_color_stop(0.0, &sprite.color.css(opacity * 0.5))?;
        glow.add_color_stop(1.0, &sprite.color.css(0.0))?;
        ctx.begin_path();
        ctx.set_fill_style_canvas_gradient(&glow);
        for (i, tip) in sprite.star_tips(style).iter().enumerate() {
            if i == 0 {
                ctx.move_to(tip.x as f64, tip.y as f64);
            } else {
                ctx.line_to(tip.x as f64, tip.y as f64);
            }
        }
        ctx.close_path();
        ctx.fill();

        // Inner glow.
        ctx.begin_path();
        ctx.set_fill_style_str(&sprite.color.css(opacity));
        ctx.arc(0.0, 0.0, size * style.core_scale as f64, 0.0, TAU)?;
        ctx.fill();

        // Bloom.
        ctx.set_shadow_color(&sprite.color.css(1.0));
        ctx.set_shadow_blur(style.bloom_blur as f64);
        ctx.set_shadow_offset_x(0.0);
        ctx.set_shadow_offset_y(0.0);
        ctx.begin_path();
        ctx.arc(0.0, 0.0, size * style.bloom_scale as f64, 0.0, TAU)?;
        ctx.fill();

        ctx.restore();
        Ok(())
    }
}

impl TrailSurface for CanvasSurface {
    fn clear(&mut self, viewport: &Viewport) {
        if let Err(err) = self.fit(viewport) {
            log::warn!("trail canvas: {err:?}");
        }
        self.ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
    }

    fn stroke_line(&mut self, line: &TrailLine, color: TrailColor) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.set_stroke_style_str(&color.css(line.opacity));
        ctx.set_line_width(line.width as f64);
        ctx.move_to(line.from.x as f64, line.from.y as f64);
        ctx.line_to(line.to.x as f64, line.to.y as f64);
        ctx.stroke();
    }

    fn draw_sprite(&mut self, sprite: &TrailSprite, style: &SpriteStyle) {
        if let Err(err) = self.paint_sprite(sprite, style) {
            // Keep save/restore balanced even if a draw call threw.
            self.ctx.restore();
            log::warn!("trail canvas: {err:?}");
        }
    }
}
