use serde::{Deserialize, Serialize};

/// A named page region. Declaration order is scroll-detection priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Hero,
    About,
    Skills,
    Projects,
    Resume,
    Contact,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Self::Hero,
        Self::About,
        Self::Skills,
        Self::Projects,
        Self::Resume,
        Self::Contact,
    ];

    /// DOM id of the section element (also its anchor link target).
    pub fn id(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Resume => "resume",
            Self::Contact => "contact",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }
}

/// The user's answer to the "enable sound effects?" prompt.
/// Captured once; immutable until explicitly cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioPermission {
    #[default]
    Unset,
    Granted,
    Denied,
}

impl AudioPermission {
    pub fn from_choice(allowed: bool) -> Self {
        if allowed {
            Self::Granted
        } else {
            Self::Denied
        }
    }

    pub fn is_resolved(self) -> bool {
        self != Self::Unset
    }

    pub fn allows_sound(self) -> bool {
        self == Self::Granted
    }
}

/// Screen side the story guide box anchors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Viewport size in CSS pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            dpr: if dpr > 0.0 { dpr } else { 1.0 },
        }
    }

    /// Canvas backing-store size in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr).round() as u32,
            (self.height * self.dpr).round() as u32,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

/// User-agent fragments that mark a touch-primary device.
const TOUCH_AGENTS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Form factor as reported by the runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceProfile {
    pub touch_primary: bool,
    pub viewport_width: f64,
}

impl DeviceProfile {
    pub fn from_user_agent(user_agent: &str, viewport_width: f64) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        Self {
            touch_primary: TOUCH_AGENTS.iter().any(|frag| ua.contains(frag)),
            viewport_width,
        }
    }

    pub fn desktop(viewport_width: f64) -> Self {
        Self {
            touch_primary: false,
            viewport_width,
        }
    }
}

/// Vertical extent of a page region, relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionBounds {
    pub top: f64,
    pub bottom: f64,
}

impl RegionBounds {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// True when the box spans the horizontal line at `y`.
    pub fn straddles(&self, y: f64) -> bool {
        self.top <= y && self.bottom >= y
    }
}
