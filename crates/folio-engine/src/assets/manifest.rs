use serde::{Deserialize, Serialize};

/// Opaque asset URLs the bridge loads on the engine's behalf.
/// Loaded from JSON handed in by the host page; every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    /// Entrance glitch sound.
    pub glitch_sound: String,
    /// Looping background music.
    pub ambient_loop: String,
    pub profile_image: String,
    /// Downloadable resume document.
    pub resume: String,
    /// Decorative portal animation (Lottie JSON).
    pub portal_animation: String,
    /// Project screenshots, in display order.
    pub screenshots: Vec<String>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            glitch_sound: "assets/glitch-sound.mp3".into(),
            ambient_loop: "assets/main.mp3".into(),
            profile_image: "assets/profile.png".into(),
            resume: "assets/resume.pdf".into(),
            portal_animation: "assets/portal-animation.json".into(),
            screenshots: (1..=5)
                .map(|i| {
                    if i == 1 {
                        "assets/image.png".to_owned()
                    } else {
                        format!("assets/image{i}.png")
                    }
                })
                .collect(),
        }
    }
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
