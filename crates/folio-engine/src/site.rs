//! The host that wires every component to the shared clock.
//!
//! Entrance runs first and alone. Its completion reveals the main content,
//! attaches the section detector, starts the story guide for the current
//! section and turns the ambient loop on. The pointer trail runs the whole
//! time on devices that support it.
//!
//! Like the entrance sequencer, `Site` performs no I/O. Everything the page
//! must do comes out of `drain_events`.

use crate::api::config::SiteConfig;
use crate::api::error::FolioError;
use crate::api::types::{DeviceProfile, RegionBounds, Section, Viewport};
use crate::content::scripts::ScriptBook;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::traits::TrailSurface;
use crate::systems::ambient::{AmbientAudio, AmbientCommand};
use crate::systems::contact::ContactForm;
use crate::systems::dialogue::{ClickOutcome, DialogueDriver, DialogueView, Narrator};
use crate::systems::entrance::{EntranceEvent, EntranceSequencer};
use crate::systems::sections::{NavState, SectionChange, SectionDetector};
use crate::systems::sparks::{Spark, SparkEmitter};
use crate::systems::trail::TrailEngine;

/// Work for the page, in the order it was produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteEvent {
    Entrance(EntranceEvent),
    /// Entrance finished; swap the overlay for the main content.
    MainShown,
    SectionChanged(SectionChange),
    Nav(NavState),
    Ambient(AmbientCommand),
    /// One hero field particle.
    FieldSpark(Spark),
}

pub struct Site<N: Narrator> {
    config: SiteConfig,
    narrator: N,
    entrance: EntranceSequencer,
    sections: SectionDetector,
    nav: NavState,
    dialogue: DialogueDriver,
    ambient: AmbientAudio,
    field: SparkEmitter,
    trail: Option<TrailEngine>,
    input: InputQueue,
    contact: ContactForm,
    main_shown: bool,
    now: f64,
    events: Vec<SiteEvent>,
}

impl<N: Narrator> Site<N> {
    pub fn new(config: SiteConfig, narrator: N, viewport: Viewport, device: &DeviceProfile) -> Self {
        Self::with_scripts(config, ScriptBook::portfolio(), narrator, viewport, device)
    }

    pub fn with_scripts(
        config: SiteConfig,
        scripts: ScriptBook,
        narrator: N,
        viewport: Viewport,
        device: &DeviceProfile,
    ) -> Self {
        let seed = config.seed;
        if !narrator.is_available() {
            log::warn!("site: {}; dialogue will be silent", FolioError::NarrationUnavailable);
        }
        Self {
            entrance: EntranceSequencer::new(config.entrance.clone(), seed),
            sections: SectionDetector::new(&config.sections),
            nav: NavState::default(),
            dialogue: DialogueDriver::new(config.dialogue.clone(), scripts),
            ambient: AmbientAudio::new(&config.ambient),
            field: SparkEmitter::field(&config.field, seed.wrapping_add(1)),
            trail: TrailEngine::for_device(config.trail.clone(), seed, viewport, device),
            input: InputQueue::new(),
            contact: ContactForm::new(config.contact.clone()),
            main_shown: false,
            now: 0.0,
            events: Vec::new(),
            narrator,
            config,
        }
    }

    // -- entrance ---------------------------------------------------------

    pub fn choose_sound(&mut self, allowed: bool, now: f64) {
        self.entrance.choose(allowed, now);
        self.collect_entrance(now);
    }

    pub fn sound_ready(&mut self, now: f64) {
        self.entrance.sound_ready(now);
        self.collect_entrance(now);
    }

    pub fn sound_failed(&mut self, now: f64, error: &FolioError) {
        self.entrance.sound_failed(now, error);
        self.collect_entrance(now);
    }

    /// Back to the permission prompt. Only meaningful before completion.
    pub fn reset_permission(&mut self) {
        if self.main_shown {
            log::debug!("site: entrance already complete, ignoring permission reset");
            return;
        }
        self.entrance.reset_permission();
        self.collect_entrance(self.now);
    }

    // -- input ------------------------------------------------------------

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if self.trail.is_some() {
            self.input.push(InputEvent::PointerMove { x, y });
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if self.trail.is_some() {
            self.input.push(InputEvent::Resize(viewport));
        }
    }

    /// One scroll event. `bounds` reports each section's box relative to the
    /// viewport, or `None` if the section is not on the page.
    pub fn scroll<F>(&mut self, scroll_y: f64, viewport_height: f64, bounds: F) -> Option<SectionChange>
    where
        F: FnMut(Section) -> Option<RegionBounds>,
    {
        if !self.main_shown {
            return None;
        }
        let change = self.sections.on_scroll(viewport_height, bounds);
        if let Some(change) = change {
            self.dialogue.activate(change.current, self.now, &mut self.narrator);
            self.events.push(SiteEvent::SectionChanged(change));
        }
        if self.nav.update(scroll_y, self.sections.active(), &self.config.sections) {
            self.events.push(SiteEvent::Nav(self.nav));
        }
        change
    }

    pub fn dialogue_click(&mut self, now: f64) -> ClickOutcome {
        self.dialogue.click(now, &mut self.narrator)
    }

    pub fn toggle_audio(&mut self) -> AmbientCommand {
        let command = self.ambient.toggle();
        self.events.push(SiteEvent::Ambient(command));
        command
    }

    pub fn playback_rejected(&self, error: &FolioError) {
        self.ambient.playback_rejected(error);
    }

    // -- frame ------------------------------------------------------------

    /// Advance everything to `now`, sampled once per animation frame.
    pub fn tick(&mut self, now: f64) {
        self.now = now;
        self.entrance.tick(now);
        self.collect_entrance(now);

        self.dialogue.tick(now);

        for spark in self.field.poll(now) {
            self.events.push(SiteEvent::FieldSpark(spark));
        }

        if let Some(trail) = self.trail.as_mut() {
            trail.frame(&mut self.input);
        }
    }

    pub fn render_trail<S: TrailSurface + ?Sized>(&self, surface: &mut S) {
        if let Some(trail) = &self.trail {
            trail.render(surface);
        }
    }

    fn collect_entrance(&mut self, now: f64) {
        for event in self.entrance.drain_events() {
            let completed = event == EntranceEvent::Completed;
            self.events.push(SiteEvent::Entrance(event));
            if completed {
                self.show_main(now);
            }
        }
    }

    fn show_main(&mut self, now: f64) {
        if self.main_shown {
            return;
        }
        log::info!("site: entrance complete, showing main content");
        self.main_shown = true;
        self.events.push(SiteEvent::MainShown);
        self.sections.attach();
        self.dialogue.activate(self.sections.active(), now, &mut self.narrator);
        self.field.start(now);
        if let Some(command) = self.ambient.set_playing(true) {
            self.events.push(SiteEvent::Ambient(command));
        }
    }

    /// Stop every timer, narration and sound. Nothing fires afterwards.
    pub fn shutdown(&mut self) {
        log::info!("site: shutting down");
        self.entrance.teardown();
        self.collect_entrance(self.now);
        self.dialogue.teardown(&mut self.narrator);
        self.sections.detach();
        self.field.stop();
        if let Some(command) = self.ambient.set_playing(false) {
            self.events.push(SiteEvent::Ambient(command));
        }
        if let Some(trail) = self.trail.as_mut() {
            trail.clear();
        }
        self.input.clear();
    }

    pub fn drain_events(&mut self) -> Vec<SiteEvent> {
        std::mem::take(&mut self.events)
    }

    // -- accessors --------------------------------------------------------

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn entrance(&self) -> &EntranceSequencer {
        &self.entrance
    }

    pub fn dialogue(&self) -> &DialogueDriver {
        &self.dialogue
    }

    pub fn dialogue_view(&self, now: f64) -> Option<DialogueView> {
        self.dialogue.view(now)
    }

    pub fn active_section(&self) -> Section {
        self.sections.active()
    }

    pub fn nav(&self) -> NavState {
        self.nav
    }

    pub fn ambient(&self) -> &AmbientAudio {
        &self.ambient
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut ContactForm {
        &mut self.contact
    }

    pub fn trail(&self) -> Option<&TrailEngine> {
        self.trail.as_ref()
    }

    pub fn narrator(&self) -> &N {
        &self.narrator
    }

    pub fn is_main_shown(&self) -> bool {
        self.main_shown
    }

    pub fn has_trail(&self) -> bool {
        self.trail.is_some()
    }
}
