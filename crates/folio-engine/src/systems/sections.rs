//! Scroll-driven active section detection and navbar state.

use crate::api::config::SectionConfig;
use crate::api::types::{RegionBounds, Section};

/// Emitted when the active section moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionChange {
    pub previous: Section,
    pub current: Section,
}

/// Single writer of the Active Section. Only listens while attached, i.e.
/// while main content is shown.
pub struct SectionDetector {
    threshold_ratio: f64,
    active: Section,
    previous: Option<Section>,
    attached: bool,
}

impl SectionDetector {
    pub fn new(config: &SectionConfig) -> Self {
        Self {
            threshold_ratio: config.threshold_ratio,
            active: Section::default(),
            previous: None,
            attached: false,
        }
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn active(&self) -> Section {
        self.active
    }

    pub fn previous(&self) -> Option<Section> {
        self.previous
    }

    /// First section, in priority order, whose bounds straddle the detection
    /// line. Sections with no bounds (absent from the page) are skipped.
    pub fn resolve<F>(&self, viewport_height: f64, mut bounds: F) -> Option<Section>
    where
        F: FnMut(Section) -> Option<RegionBounds>,
    {
        let line = viewport_height * self.threshold_ratio;
        Section::ALL
            .into_iter()
            .find(|&s| bounds(s).is_some_and(|b| b.straddles(line)))
    }

    /// Evaluate one scroll event. No match keeps the current section.
    pub fn on_scroll<F>(&mut self, viewport_height: f64, bounds: F) -> Option<SectionChange>
    where
        F: FnMut(Section) -> Option<RegionBounds>,
    {
        if !self.attached {
            return None;
        }
        let found = self.resolve(viewport_height, bounds)?;
        if found == self.active {
            return None;
        }
        let change = SectionChange {
            previous: self.active,
            current: found,
        };
        log::debug!("sections: {:?} -> {:?}", change.previous, change.current);
        self.previous = Some(self.active);
        self.active = found;
        Some(change)
    }
}

/// Navbar display state: compact once scrolled, plus the highlighted link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavState {
    pub compact: bool,
    pub highlighted: Section,
}

impl NavState {
    /// Returns true when anything visible changed.
    pub fn update(&mut self, scroll_y: f64, active: Section, config: &SectionConfig) -> bool {
        let next = NavState {
            compact: scroll_y > config.nav_compact_after_px,
            highlighted: active,
        };
        let changed = next != *self;
        *self = next;
        changed
    }
}
