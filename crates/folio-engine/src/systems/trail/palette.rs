//! Trail colors. Stored as plain RGB; alpha is applied per draw.

use serde::{Deserialize, Serialize};

use super::rng::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TrailColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS `rgba()` string with the given alpha, clamped to [0, 1].
    pub fn css(&self, alpha: f32) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            alpha.clamp(0.0, 1.0)
        )
    }
}

/// Pinks and violets.
pub const DEFAULT_PALETTE: [TrailColor; 5] = [
    TrailColor::rgb(236, 72, 153),
    TrailColor::rgb(167, 139, 250),
    TrailColor::rgb(244, 114, 182),
    TrailColor::rgb(139, 92, 246),
    TrailColor::rgb(219, 39, 119),
];

/// Uniform pick from `palette`; falls back to the first default color when
/// the palette is empty.
pub fn pick(palette: &[TrailColor], rng: &mut Rng) -> TrailColor {
    if palette.is_empty() {
        return DEFAULT_PALETTE[0];
    }
    palette[rng.next_int(palette.len() as u32) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_formats_and_clamps() {
        let c = TrailColor::rgb(236, 72, 153);
        assert_eq!(c.css(0.5), "rgba(236, 72, 153, 0.5)");
        assert_eq!(c.css(2.0), "rgba(236, 72, 153, 1)");
        assert_eq!(c.css(-1.0), "rgba(236, 72, 153, 0)");
    }

    #[test]
    fn pick_stays_in_palette() {
        let mut rng = Rng::new(42);
        for _ in 0..100 {
            assert!(DEFAULT_PALETTE.contains(&pick(&DEFAULT_PALETTE, &mut rng)));
        }
    }

    #[test]
    fn empty_palette_falls_back() {
        let mut rng = Rng::new(1);
        assert_eq!(pick(&[], &mut rng), DEFAULT_PALETTE[0]);
    }
}
