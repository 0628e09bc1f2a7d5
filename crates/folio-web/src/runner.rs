use folio_engine::{
    AmbientCommand, AssetManifest, ClickOutcome, DialogueView, EmailRequest, EntranceEvent,
    DeviceProfile, EntranceView, FolioError, NavState, Section, Site, SiteConfig, SiteEvent,
    SubmitStatus, Viewport,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent};

use crate::audio::Sound;
use crate::canvas::CanvasSurface;
use crate::dom;
use crate::listeners::EventListener;
use crate::speech::SpeechNarrator;
use crate::with_runner;

/// Page element ids the runner writes to. A missing element only disables
/// that piece of chrome.
mod ids {
    pub const ENTRANCE: &str = "entrance";
    pub const SOUND_PROMPT: &str = "sound-prompt";
    pub const POWER_BUTTON: &str = "power-button";
    pub const TITLE: &str = "entrance-title";
    pub const PRIMARY_TAGLINE: &str = "tagline-primary";
    pub const SECONDARY_TAGLINE: &str = "tagline-secondary";
    pub const ENTRANCE_SPARKS: &str = "entrance-sparks";
    pub const MAIN: &str = "main-content";
    pub const FIELD: &str = "quantum-field";
    pub const TRAIL_CANVAS: &str = "trail-canvas";
    pub const NAVBAR: &str = "navbar";
    pub const AUDIO_TOGGLE: &str = "audio-toggle";
    pub const GUIDE: &str = "guide";
    pub const GUIDE_BODY: &str = "guide-body";
    pub const GUIDE_GLYPH: &str = "guide-glyph";
    pub const GUIDE_NAME: &str = "guide-name";
    pub const GUIDE_TEXT: &str = "guide-text";
    pub const GUIDE_CURSOR: &str = "guide-cursor";
    pub const GUIDE_CONTINUE: &str = "guide-continue";
    pub const CONTACT_STATUS: &str = "contact-status";
}

/// Owns the engine plus every browser resource it drives.
///
/// Lives in a `thread_local!` in `lib.rs`; DOM callbacks reach it through
/// `with_runner`, because wasm-bindgen cannot hand out references to it.
pub struct SiteRunner {
    site: Site<SpeechNarrator>,
    manifest: AssetManifest,
    surface: Option<CanvasSurface>,
    glitch: Option<Sound>,
    ambient: Option<Sound>,
    listeners: Vec<EventListener>,
    last_dialogue: Option<DialogueView>,
}

impl SiteRunner {
    pub fn new(config: SiteConfig) -> Self {
        Self::with_device(config, dom::viewport(), &dom::device_profile())
    }

    pub fn with_device(config: SiteConfig, viewport: Viewport, device: &DeviceProfile) -> Self {
        let site = Site::new(config, SpeechNarrator::detect(), viewport, device);

        let surface = if site.has_trail() {
            dom::by_id(ids::TRAIL_CANVAS)
                .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
                .and_then(|canvas| match CanvasSurface::new(canvas) {
                    Ok(surface) => Some(surface),
                    Err(err) => {
                        log::warn!("trail canvas unavailable: {err:?}");
                        None
                    }
                })
        } else {
            None
        };

        Self {
            site,
            manifest: AssetManifest::default(),
            surface,
            glitch: None,
            ambient: None,
            listeners: Vec::new(),
            last_dialogue: None,
        }
    }

    /// Static text, the initial overlay and the ambient element.
    pub fn init(&mut self) {
        let entrance = self.site.config().entrance.clone();
        dom::set_text(ids::TITLE, &entrance.title);
        dom::set_text(ids::PRIMARY_TAGLINE, &entrance.primary_tagline);
        dom::set_text(ids::SECONDARY_TAGLINE, &entrance.secondary_tagline);
        dom::set_text(ids::AUDIO_TOGGLE, self.site.ambient().indicator());
        paint_entrance(&self.site.entrance().view());
        self.rebuild_ambient();
    }

    pub fn load_manifest(&mut self, manifest: AssetManifest) {
        self.manifest = manifest;
        self.rebuild_ambient();
    }

    fn rebuild_ambient(&mut self) {
        if let Some(old) = self.ambient.take() {
            old.release();
        }
        let volume = self.site.ambient().volume();
        match Sound::new(&self.manifest.ambient_loop, volume, true) {
            Ok(sound) => {
                if self.site.ambient().is_playing() {
                    sound.play(report_ambient_rejection);
                }
                self.ambient = Some(sound);
            }
            Err(err) => log::warn!("ambient: {}", FolioError::AssetLoad(format!("{err:?}"))),
        }
    }

    /// Trail listeners only exist when the device runs the trail. Scroll is
    /// attached later, once the main content is shown.
    pub fn attach_listeners(&mut self) -> Result<(), JsValue> {
        let window = dom::window()?;

        if self.site.has_trail() {
            self.listeners.push(EventListener::new(&window, "mousemove", |event| {
                if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                    let (x, y) = (mouse.client_x() as f32, mouse.client_y() as f32);
                    with_runner(|r| r.site.pointer_moved(x, y));
                }
            })?);

            self.listeners.push(EventListener::new(&window, "resize", |_| {
                with_runner(|r| r.site.resize(dom::viewport()));
            })?);
        }

        if let Some(guide) = dom::by_id(ids::GUIDE) {
            self.listeners.push(EventListener::new(&guide, "click", |_| {
                with_runner(|r| r.dialogue_click());
            })?);
        }
        Ok(())
    }

    fn attach_scroll(&mut self) -> Result<(), JsValue> {
        if self.listens_for("scroll") {
            return Ok(());
        }
        let window = dom::window()?;
        self.listeners.push(EventListener::new(&window, "scroll", |_| {
            with_runner(|r| r.on_scroll());
        })?);
        Ok(())
    }

    pub fn listens_for(&self, event: &str) -> bool {
        self.listeners.iter().any(|l| l.event() == event)
    }

    pub fn has_trail(&self) -> bool {
        self.site.has_trail()
    }

    // ---- Commands from the page ----

    pub fn choose_sound(&mut self, allowed: bool) {
        self.site.choose_sound(allowed, dom::now());
        self.apply_events();
    }

    pub fn reset_permission(&mut self) {
        self.site.reset_permission();
        self.apply_events();
    }

    pub fn toggle_audio(&mut self) -> &'static str {
        self.site.toggle_audio();
        self.apply_events();
        self.site.ambient().indicator()
    }

    pub fn dialogue_click(&mut self) -> ClickOutcome {
        let outcome = self.site.dialogue_click(dom::now());
        self.paint_dialogue(dom::now());
        outcome
    }

    pub fn active_section(&self) -> Section {
        self.site.active_section()
    }

    fn on_scroll(&mut self) {
        let height = dom::viewport().height;
        self.site.scroll(dom::scroll_y(), height, dom::section_bounds);
        self.apply_events();
    }

    pub fn begin_contact(
        &mut self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<(String, EmailRequest), FolioError> {
        let form = self.site.contact_mut();
        form.fill(name, email, message);
        let request = form.begin_submit()?;
        let endpoint = form.endpoint().to_owned();
        paint_contact(form.status());
        Ok((endpoint, request))
    }

    pub fn finish_contact(&mut self, response: Result<String, FolioError>) -> SubmitStatus {
        let status = self.site.contact_mut().finish_submit(response).clone();
        paint_contact(&status);
        status
    }

    // ---- Loading callbacks ----

    fn on_glitch_ready(&mut self) {
        self.site.sound_ready(dom::now());
        self.apply_events();
    }

    fn on_glitch_failed(&mut self, err: FolioError) {
        self.site.sound_failed(dom::now(), &err);
        self.apply_events();
    }

    // ---- Frame ----

    /// One animation frame on the shared clock.
    pub fn frame(&mut self, now: f64) {
        self.site.tick(now);
        self.apply_events();
        if let Some(surface) = self.surface.as_mut() {
            self.site.render_trail(surface);
        }
        self.paint_dialogue(now);
    }

    fn apply_events(&mut self) {
        loop {
            let events = self.site.drain_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                self.apply(event);
            }
        }
    }

    fn apply(&mut self, event: SiteEvent) {
        match event {
            SiteEvent::Entrance(event) => self.apply_entrance(event),
            SiteEvent::MainShown => {
                dom::set_class(ids::ENTRANCE, "hidden", true);
                dom::set_class(ids::MAIN, "visible", true);
                if let Err(err) = self.attach_scroll() {
                    log::warn!("scroll listener: {err:?}");
                }
            }
            SiteEvent::SectionChanged(change) => {
                log::info!("section: {} -> {}", change.previous.id(), change.current.id());
            }
            SiteEvent::Nav(nav) => paint_nav(&nav),
            SiteEvent::Ambient(command) => self.apply_ambient(command),
            SiteEvent::FieldSpark(spark) => {
                if let Err(err) = dom::spawn_spark(ids::FIELD, "quantum-particle", &spark) {
                    log::debug!("field spark dropped: {err:?}");
                }
            }
        }
    }

    fn apply_entrance(&mut self, event: EntranceEvent) {
        match event {
            EntranceEvent::LoadSound => self.load_glitch(),
            EntranceEvent::PlaySound => {
                if let Some(glitch) = &self.glitch {
                    glitch.play_from_start(|err| log::warn!("entrance: {err}"));
                }
            }
            EntranceEvent::ReleaseSound => {
                if let Some(glitch) = self.glitch.take() {
                    glitch.release();
                }
            }
            EntranceEvent::PhaseChanged(_) => paint_entrance(&self.site.entrance().view()),
            EntranceEvent::Spark(spark) => {
                if let Err(err) = dom::spawn_spark(ids::ENTRANCE_SPARKS, "spark", &spark) {
                    log::debug!("entrance spark dropped: {err:?}");
                }
            }
            EntranceEvent::Completed => log::info!("entrance: complete"),
        }
    }

    fn load_glitch(&mut self) {
        let volume = self.site.config().entrance.sound_volume;
        let loaded = Sound::new(&self.manifest.glitch_sound, volume, false).and_then(|mut sound| {
            sound.preload(
                || {
                    with_runner(|r| r.on_glitch_ready());
                },
                |err| {
                    with_runner(move |r| r.on_glitch_failed(err));
                },
            )?;
            Ok(sound)
        });
        match loaded {
            Ok(sound) => self.glitch = Some(sound),
            Err(err) => {
                let err = FolioError::AssetLoad(format!("{err:?}"));
                self.site.sound_failed(dom::now(), &err);
            }
        }
    }

    fn apply_ambient(&mut self, command: AmbientCommand) {
        dom::set_text(ids::AUDIO_TOGGLE, self.site.ambient().indicator());
        let Some(ambient) = &self.ambient else {
            return;
        };
        match command {
            AmbientCommand::Play { volume } => {
                ambient.set_volume(volume);
                ambient.play(report_ambient_rejection);
            }
            AmbientCommand::Pause { volume } => {
                ambient.set_volume(volume);
                ambient.pause();
            }
        }
    }

    fn paint_dialogue(&mut self, now: f64) {
        let view = self.site.dialogue_view(now);
        match (&view, &self.last_dialogue) {
            (None, None) => {}
            (None, Some(_)) => dom::set_class(ids::GUIDE, "visible", false),
            (Some(v), last) => {
                let fresh = last
                    .as_ref()
                    .map_or(true, |l| l.section != v.section || l.index != v.index);
                if fresh {
                    dom::set_class(ids::GUIDE, "visible", true);
                    dom::set_class(ids::GUIDE, "left", v.side.as_str() == "left");
                    dom::set_class(ids::GUIDE, "right", v.side.as_str() == "right");
                    dom::set_text(ids::GUIDE_GLYPH, &v.glyph);
                    dom::set_text(ids::GUIDE_NAME, &v.speaker);
                }
                if fresh || last.as_ref().is_some_and(|l| l.text != v.text) {
                    dom::set_text(ids::GUIDE_TEXT, &v.text);
                }
                dom::set_style(
                    ids::GUIDE_BODY,
                    "transform",
                    &format!("translateX({:.2}px)", v.box_offset),
                );
                dom::set_style(ids::GUIDE_BODY, "opacity", &format!("{:.3}", v.box_opacity));
                dom::set_style(
                    ids::GUIDE_GLYPH,
                    "transform",
                    &format!("translateY({:.2}px)", v.bob_offset),
                );
                dom::set_class(ids::GUIDE_CURSOR, "hidden", !v.typing);
                dom::set_style(ids::GUIDE_CURSOR, "opacity", &format!("{:.3}", v.cursor_opacity));
                dom::set_class(ids::GUIDE_CONTINUE, "visible", v.show_continue);
            }
        }
        self.last_dialogue = view;
    }

    /// Tear down timers, narration, audio and listeners.
    pub fn shutdown(&mut self) {
        self.site.shutdown();
        self.apply_events();
        self.listeners.clear();
        if let Some(glitch) = self.glitch.take() {
            glitch.release();
        }
        if let Some(ambient) = self.ambient.take() {
            ambient.release();
        }
        self.paint_dialogue(dom::now());
    }
}

fn report_ambient_rejection(err: FolioError) {
    // Runs from a promise callback, outside any runner borrow.
    if with_runner(|r| r.site.playback_rejected(&err)).is_none() {
        log::warn!("ambient: {err}");
    }
}

fn paint_entrance(view: &EntranceView) {
    dom::set_class(ids::SOUND_PROMPT, "visible", view.permission_prompt);
    dom::set_class(ids::ENTRANCE, "active", view.overlay_visible);
    dom::set_class(ids::POWER_BUTTON, "active", view.power_active);
    dom::set_class(ids::TITLE, "visible", view.title_visible);
    dom::set_class(ids::TITLE, "glitch", view.title_glitching);
    dom::set_class(ids::PRIMARY_TAGLINE, "visible", view.primary_tagline_visible);
    dom::set_class(ids::SECONDARY_TAGLINE, "visible", view.secondary_tagline_visible);
    dom::set_class(ids::ENTRANCE, "exiting", view.exiting);
}

fn paint_nav(nav: &NavState) {
    dom::set_class(ids::NAVBAR, "scrolled", nav.compact);
    for section in Section::ALL {
        let link = format!("nav-{}", section.id());
        dom::set_class(&link, "active", section == nav.highlighted);
    }
}

fn paint_contact(status: &SubmitStatus) {
    let text = match status {
        SubmitStatus::Idle => "",
        SubmitStatus::Submitting => "Sending...",
        SubmitStatus::Success => "Message sent successfully!",
        SubmitStatus::Error(message) => message.as_str(),
    };
    dom::set_text(ids::CONTACT_STATUS, text);
    dom::set_class(ids::CONTACT_STATUS, "error", matches!(status, SubmitStatus::Error(_)));
}
