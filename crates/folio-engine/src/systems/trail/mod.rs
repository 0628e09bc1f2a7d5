//! Pointer-following particle trail.
//!
//! The engine owns its point set outright: pointer moves spawn points, every
//! frame ages and moves all of them, then a draw list is rebuilt from the
//! settled state. Nothing outside the engine holds a reference to a point.

pub mod palette;
pub mod point;
pub mod rng;

use glam::Vec2;

use crate::api::config::TrailConfig;
use crate::api::types::{DeviceProfile, Viewport};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::draw_list::{SpriteStyle, TrailDrawList, TrailLine, TrailSprite};
use crate::renderer::traits::TrailSurface;

pub use palette::TrailColor;
pub use point::TrailPoint;
pub use rng::Rng;

pub struct TrailEngine {
    config: TrailConfig,
    style: SpriteStyle,
    points: Vec<TrailPoint>,
    /// Pointer position of the most recent spawn.
    last_spawn: Option<Vec2>,
    viewport: Viewport,
    rng: Rng,
    draw_list: TrailDrawList,
}

impl TrailEngine {
    pub fn new(config: TrailConfig, seed: u64, viewport: Viewport) -> Self {
        let style = SpriteStyle::from_config(&config);
        Self {
            config,
            style,
            points: Vec::with_capacity(128),
            last_spawn: None,
            viewport,
            rng: Rng::new(seed.wrapping_add(7919)),
            draw_list: TrailDrawList::default(),
        }
    }

    /// Touch-primary devices and narrow viewports get no trail at all.
    pub fn is_supported(config: &TrailConfig, device: &DeviceProfile) -> bool {
        !device.touch_primary && device.viewport_width > config.narrow_viewport
    }

    /// Build an engine only when the device supports the effect.
    pub fn for_device(
        config: TrailConfig,
        seed: u64,
        viewport: Viewport,
        device: &DeviceProfile,
    ) -> Option<Self> {
        if Self::is_supported(&config, device) {
            Some(Self::new(config, seed, viewport))
        } else {
            log::info!("pointer trail disabled for this device");
            None
        }
    }

    /// Handle a pointer move. Returns the number of points spawned.
    pub fn pointer_moved(&mut self, at: Vec2) -> usize {
        if let Some(last) = self.last_spawn {
            if last.distance(at) < self.config.min_spawn_distance {
                return 0;
            }
        }
        self.last_spawn = Some(at);
        for _ in 0..self.config.spawn_count {
            let p = TrailPoint::spawn(at, &self.config, &mut self.rng);
            self.points.push(p);
        }
        self.config.spawn_count
    }

    /// Track a new viewport. Live points are kept.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Advance every point by one frame and retire expired ones. Once the
    /// trail has fully faded the next move spawns regardless of distance.
    pub fn update(&mut self) {
        let config = &self.config;
        let rng = &mut self.rng;
        self.points.retain_mut(|p| p.tick(config, rng));
        if self.points.is_empty() {
            self.last_spawn = None;
        }
    }

    /// Rebuild lines and sprites from the current point set.
    pub fn rebuild_draw_list(&mut self) {
        self.draw_list.clear();

        let reach = self.config.connect_distance;
        if reach > 0.0 {
            for (i, a) in self.points.iter().enumerate() {
                for b in &self.points[i + 1..] {
                    let d = a.pos.distance(b.pos);
                    if d < reach {
                        let closeness = 1.0 - d / reach;
                        self.draw_list.lines.push(TrailLine {
                            from: a.pos,
                            to: b.pos,
                            opacity: closeness * self.config.line_opacity,
                            width: closeness,
                        });
                    }
                }
            }
        }

        let lifetime = self.config.lifetime;
        self.draw_list
            .sprites
            .extend(self.points.iter().map(|p| TrailSprite {
                pos: p.pos,
                rotation: p.rotation,
                size: p.size,
                color: p.color,
                opacity: p.opacity(lifetime),
            }));
    }

    /// One animation frame: apply queued input, update all points, then
    /// rebuild the draw list.
    pub fn frame(&mut self, input: &mut InputQueue) {
        for event in input.drain() {
            match event {
                InputEvent::PointerMove { x, y } => {
                    self.pointer_moved(Vec2::new(x, y));
                }
                InputEvent::Resize(viewport) => self.resize(viewport),
            }
        }
        self.update();
        self.rebuild_draw_list();
    }

    /// Paint the last built draw list.
    pub fn render<S: TrailSurface + ?Sized>(&self, surface: &mut S) {
        surface.clear(&self.viewport);
        for line in &self.draw_list.lines {
            surface.stroke_line(line, self.config.line_color);
        }
        for sprite in &self.draw_list.sprites {
            surface.draw_sprite(sprite, &self.style);
        }
    }

    /// Drop every point and forget the last spawn (teardown).
    pub fn clear(&mut self) {
        self.points.clear();
        self.draw_list.clear();
        self.last_spawn = None;
    }

    pub fn points(&self) -> &[TrailPoint] {
        &self.points
    }

    pub fn draw_list(&self) -> &TrailDrawList {
        &self.draw_list
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TrailEngine {
        TrailEngine::new(TrailConfig::default(), 42, Viewport::default())
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<&'static str>,
    }

    impl TrailSurface for Recorder {
        fn clear(&mut self, _viewport: &Viewport) {
            self.ops.push("clear");
        }
        fn stroke_line(&mut self, _line: &TrailLine, _color: TrailColor) {
            self.ops.push("line");
        }
        fn draw_sprite(&mut self, _sprite: &TrailSprite, _style: &SpriteStyle) {
            self.ops.push("sprite");
        }
    }

    #[test]
    fn first_move_spawns_configured_count() {
        let mut e = engine();
        assert_eq!(e.pointer_moved(Vec2::new(10.0, 10.0)), 2);
        assert_eq!(e.points().len(), 2);
    }

    #[test]
    fn moves_below_spawn_distance_are_ignored() {
        let mut e = engine();
        e.pointer_moved(Vec2::new(10.0, 10.0));
        assert_eq!(e.pointer_moved(Vec2::new(11.0, 11.0)), 0);
        assert_eq!(e.pointer_moved(Vec2::new(12.0, 10.0)), 0);
        assert_eq!(e.points().len(), 2);
        assert_eq!(e.pointer_moved(Vec2::new(13.0, 10.0)), 2);
        assert_eq!(e.points().len(), 4);
    }

    #[test]
    fn points_retire_after_lifetime() {
        let mut e = engine();
        e.pointer_moved(Vec2::new(100.0, 100.0));
        for _ in 0..23 {
            e.update();
        }
        assert_eq!(e.points().len(), 2);
        e.update();
        assert!(e.points().is_empty());
    }

    #[test]
    fn faded_trail_spawns_on_any_move() {
        let mut e = engine();
        e.pointer_moved(Vec2::new(100.0, 100.0));
        for _ in 0..30 {
            e.update();
        }
        assert!(e.points().is_empty());
        assert_eq!(e.pointer_moved(Vec2::new(101.0, 100.0)), 2);
    }

    #[test]
    fn resize_keeps_points() {
        let mut e = engine();
        e.pointer_moved(Vec2::new(100.0, 100.0));
        e.resize(Viewport::new(1920.0, 1080.0, 2.0));
        assert_eq!(e.points().len(), 2);
        assert_eq!(e.viewport().dpr, 2.0);
    }

    #[test]
    fn nearby_points_are_connected() {
        let mut e = engine();
        e.pointer_moved(Vec2::new(100.0, 100.0));
        e.rebuild_draw_list();
        // Twins sit at most ~21px apart, inside the 40px reach.
        assert_eq!(e.draw_list().lines.len(), 1);
        assert_eq!(e.draw_list().sprites.len(), 2);
        let line = e.draw_list().lines[0];
        assert!(line.opacity > 0.0 && line.opacity <= 0.3);
    }

    #[test]
    fn distant_points_are_not_connected() {
        let mut e = engine();
        e.pointer_moved(Vec2::new(0.0, 0.0));
        e.pointer_moved(Vec2::new(500.0, 500.0));
        e.rebuild_draw_list();
        // Only the two pairs born together are close.
        assert_eq!(e.draw_list().lines.len(), 2);
    }

    #[test]
    fn frame_drains_input_then_renders_in_order() {
        let mut e = engine();
        let mut input = InputQueue::new();
        input.push(InputEvent::PointerMove { x: 50.0, y: 50.0 });
        e.frame(&mut input);
        assert!(input.is_empty());

        let mut rec = Recorder::default();
        e.render(&mut rec);
        assert_eq!(rec.ops, vec!["clear", "line", "sprite", "sprite"]);
    }

    #[test]
    fn render_clears_even_when_empty() {
        let e = engine();
        let mut rec = Recorder::default();
        e.render(&mut rec);
        assert_eq!(rec.ops, vec!["clear"]);
    }

    #[test]
    fn unsupported_devices_get_no_engine() {
        let cfg = TrailConfig::default();
        let phone = DeviceProfile {
            touch_primary: true,
            viewport_width: 1200.0,
        };
        let narrow = DeviceProfile::desktop(700.0);
        let wide = DeviceProfile::desktop(1440.0);
        assert!(TrailEngine::for_device(cfg.clone(), 1, Viewport::default(), &phone).is_none());
        assert!(TrailEngine::for_device(cfg.clone(), 1, Viewport::default(), &narrow).is_none());
        assert!(TrailEngine::for_device(cfg, 1, Viewport::default(), &wide).is_some());
    }

    #[test]
    fn clear_forgets_last_spawn() {
        let mut e = engine();
        e.pointer_moved(Vec2::new(10.0, 10.0));
        e.clear();
        assert!(e.points().is_empty());
        assert_eq!(e.pointer_moved(Vec2::new(10.0, 10.0)), 2);
    }
}
