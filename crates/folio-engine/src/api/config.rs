//! Site configuration. Every field has a default; the host page may hand in
//! a JSON blob that overrides any subset of them.

use serde::{Deserialize, Serialize};

use super::error::{FolioError, Result};
use crate::systems::trail::palette::{TrailColor, DEFAULT_PALETTE};

/// Top-level configuration, one section per component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub trail: TrailConfig,
    pub entrance: EntranceConfig,
    pub dialogue: DialogueConfig,
    pub ambient: AmbientConfig,
    pub sections: SectionConfig,
    pub field: FieldConfig,
    pub contact: ContactConfig,
    /// Seed for every random stream (trail jitter, spark placement).
    pub seed: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            trail: TrailConfig::default(),
            entrance: EntranceConfig::default(),
            dialogue: DialogueConfig::default(),
            ambient: AmbientConfig::default(),
            sections: SectionConfig::default(),
            field: FieldConfig::default(),
            contact: ContactConfig::default(),
            seed: 42,
        }
    }
}

impl SiteConfig {
    /// Parse an override blob. Missing keys keep their defaults; values that
    /// would break a component's invariants are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.trail.validate()?;
        self.entrance.validate()?;
        if self.dialogue.typing_interval_ms <= 0.0 {
            return Err(invalid("dialogue.typing_interval_ms must be positive"));
        }
        if !(0.0..=1.0).contains(&self.sections.threshold_ratio) {
            return Err(invalid("sections.threshold_ratio must be within 0..=1"));
        }
        if self.field.min_duration_ms > self.field.max_duration_ms {
            return Err(invalid("field.min_duration_ms exceeds max_duration_ms"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> FolioError {
    FolioError::Config(reason.to_owned())
}

/// Pointer trail tuning. None of these are invariants; only the thresholds
/// (spawn distance, lifetime, connection distance) have observable meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Pointer moves closer than this to the last spawn are ignored (default: 3).
    pub min_spawn_distance: f32,
    /// Points spawned per qualifying pointer move (default: 2).
    pub spawn_count: usize,
    /// Full width of the positional jitter box around the pointer (default: 15).
    pub spawn_jitter: f32,
    /// Full width of the initial velocity range per axis (default: 3).
    pub spawn_speed: f32,
    /// Smallest point size (default: 1).
    pub size_min: f32,
    /// Size range added on top of `size_min` (default: 3).
    pub size_range: f32,
    /// Age added every frame (default: 1.5).
    pub age_step: f32,
    /// Points are retired once their age reaches this (default: 35).
    pub lifetime: f32,
    /// Full width of the per-frame random velocity kick (default: 0.5).
    pub turbulence: f32,
    /// Fraction of velocity integrated into position each frame (default: 0.3).
    pub velocity_scale: f32,
    /// Multiplicative velocity decay per frame, < 1 (default: 0.92).
    pub damping: f32,
    /// Rotation added per frame in radians (default: 0.05).
    pub spin: f32,
    /// Pairs closer than this get a connecting line (default: 40).
    pub connect_distance: f32,
    /// Line opacity at zero distance (default: 0.3).
    pub line_opacity: f32,
    pub line_color: TrailColor,
    pub palette: Vec<TrailColor>,
    /// Glow gradient radius as a multiple of point size (default: 3).
    pub glow_scale: f32,
    /// Star tip radius as a multiple of point size (default: 2).
    pub star_scale: f32,
    /// Inner glow radius as a multiple of point size (default: 0.8).
    pub core_scale: f32,
    /// Bloom radius as a multiple of point size (default: 0.4).
    pub bloom_scale: f32,
    /// Bloom shadow blur in CSS pixels (default: 10).
    pub bloom_blur: f32,
    /// Viewports at or below this width count as narrow (default: 768).
    pub narrow_viewport: f64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            min_spawn_distance: 3.0,
            spawn_count: 2,
            spawn_jitter: 15.0,
            spawn_speed: 3.0,
            size_min: 1.0,
            size_range: 3.0,
            age_step: 1.5,
            lifetime: 35.0,
            turbulence: 0.5,
            velocity_scale: 0.3,
            damping: 0.92,
            spin: 0.05,
            connect_distance: 40.0,
            line_opacity: 0.3,
            line_color: TrailColor::rgb(236, 72, 153),
            palette: DEFAULT_PALETTE.to_vec(),
            glow_scale: 3.0,
            star_scale: 2.0,
            core_scale: 0.8,
            bloom_scale: 0.4,
            bloom_blur: 10.0,
            narrow_viewport: 768.0,
        }
    }
}

impl TrailConfig {
    fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.damping) {
            return Err(invalid("trail.damping must be within 0..1"));
        }
        if self.age_step <= 0.0 {
            return Err(invalid("trail.age_step must be positive"));
        }
        if self.lifetime <= 0.0 {
            return Err(invalid("trail.lifetime must be positive"));
        }
        if self.min_spawn_distance < 0.0 {
            return Err(invalid("trail.min_spawn_distance must not be negative"));
        }
        Ok(())
    }
}

/// Entrance timeline. Offsets are measured from timeline start, not from
/// each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntranceConfig {
    pub power_on_ms: f64,
    pub title_ms: f64,
    pub primary_tagline_ms: f64,
    pub secondary_tagline_ms: f64,
    pub exit_ms: f64,
    pub complete_ms: f64,
    /// Spark generator period (default: 200).
    pub spark_period_ms: f64,
    /// Give up on the glitch sound after this long (default: 4000).
    pub sound_load_timeout_ms: f64,
    /// Glitch sound volume, 0..=1 (default: 0.9).
    pub sound_volume: f64,
    pub title: String,
    pub primary_tagline: String,
    pub secondary_tagline: String,
}

impl Default for EntranceConfig {
    fn default() -> Self {
        Self {
            power_on_ms: 500.0,
            title_ms: 2000.0,
            primary_tagline_ms: 3500.0,
            secondary_tagline_ms: 4500.0,
            exit_ms: 6500.0,
            complete_ms: 8000.0,
            spark_period_ms: 200.0,
            sound_load_timeout_ms: 4000.0,
            sound_volume: 0.9,
            title: "CODE QUANTUM".into(),
            primary_tagline: "TRANSCEND THE DIGITAL FRONTIER".into(),
            secondary_tagline: "WHERE IMAGINATION MEETS INFINITY".into(),
        }
    }
}

impl EntranceConfig {
    /// Phase offsets, in the order the timeline fires them.
    pub fn offsets(&self) -> [f64; 6] {
        [
            self.power_on_ms,
            self.title_ms,
            self.primary_tagline_ms,
            self.secondary_tagline_ms,
            self.exit_ms,
            self.complete_ms,
        ]
    }

    fn validate(&self) -> Result<()> {
        let offsets = self.offsets();
        if offsets[0] < 0.0 || !offsets.windows(2).all(|w| w[0] < w[1]) {
            return Err(invalid("entrance offsets must be non-negative and increasing"));
        }
        if self.sound_load_timeout_ms <= 0.0 {
            return Err(invalid("entrance.sound_load_timeout_ms must be positive"));
        }
        Ok(())
    }
}

/// Speech synthesis parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Story guide cadence and motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// One character is revealed per interval (default: 30).
    pub typing_interval_ms: f64,
    pub narration: NarrationConfig,
    /// Dialogue box slide-in duration (default: 300).
    pub box_entry_ms: f64,
    /// Slide-in starting offset in CSS pixels (default: 50).
    pub box_entry_offset: f32,
    /// Speaker glyph bob period (default: 2000).
    pub bob_period_ms: f64,
    /// Speaker glyph bob height in CSS pixels (default: 5).
    pub bob_height: f32,
    /// Typing cursor blink period (default: 800).
    pub cursor_blink_ms: f64,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            typing_interval_ms: 30.0,
            narration: NarrationConfig::default(),
            box_entry_ms: 300.0,
            box_entry_offset: 50.0,
            bob_period_ms: 2000.0,
            bob_height: 5.0,
            cursor_blink_ms: 800.0,
        }
    }
}

/// Background loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    /// Fixed playback volume (default: 0.17).
    pub volume: f64,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self { volume: 0.17 }
    }
}

/// Scroll section detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    /// Detection line as a fraction of viewport height (default: 0.3).
    pub threshold_ratio: f64,
    /// Scroll offset past which the navbar turns compact (default: 20).
    pub nav_compact_after_px: f64,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            threshold_ratio: 0.3,
            nav_compact_after_px: 20.0,
        }
    }
}

/// Hero "quantum particle" field: DOM particles rising on a fixed cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub period_ms: f64,
    pub burst: usize,
    pub min_duration_ms: f32,
    pub max_duration_ms: f32,
    pub max_delay_ms: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            period_ms: 200.0,
            burst: 3,
            min_duration_ms: 3000.0,
            max_duration_ms: 7000.0,
            max_delay_ms: 2000.0,
        }
    }
}

/// Transactional mail service credentials. The public key is a client key,
/// safe to ship to the browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    /// Shown inline when a submission fails.
    pub error_message: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.emailjs.com/api/v1.0/email/send".into(),
            service_id: "service_portfolio".into(),
            template_id: "template_contact".into(),
            public_key: "public_key".into(),
            error_message: "Failed to send message. Please try again later.".into(),
        }
    }
}
