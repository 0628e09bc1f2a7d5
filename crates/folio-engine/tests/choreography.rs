//! End-to-end choreography through the public API.

use folio_engine::{
    ClickOutcome, DeviceProfile, EntranceEvent, NarrationConfig, Narrator, Phase, RegionBounds,
    Script, ScriptBook, Section, Side, Site, SiteConfig, SiteEvent, SpriteStyle, TrailColor,
    TrailEngine, TrailLine, TrailSprite, TrailSurface, Viewport,
};
use glam::Vec2;

#[derive(Default)]
struct RecordingNarrator {
    spoken: Vec<String>,
    cancels: usize,
}

impl Narrator for RecordingNarrator {
    fn speak(&mut self, text: &str, _voice: &NarrationConfig) {
        self.spoken.push(text.to_owned());
    }
    fn cancel(&mut self) {
        self.cancels += 1;
    }
}

#[derive(Default)]
struct RecordingSurface {
    clears: usize,
    lines: usize,
    sprites: Vec<TrailSprite>,
}

impl TrailSurface for RecordingSurface {
    fn clear(&mut self, _viewport: &Viewport) {
        self.clears += 1;
        self.lines = 0;
        self.sprites.clear();
    }
    fn stroke_line(&mut self, _line: &TrailLine, _color: TrailColor) {
        self.lines += 1;
    }
    fn draw_sprite(&mut self, sprite: &TrailSprite, _style: &SpriteStyle) {
        self.sprites.push(*sprite);
    }
}

fn two_section_book() -> ScriptBook {
    ScriptBook::new()
        .with(
            Section::Hero,
            Script::new("G", "Guide", Side::Left, &["one", "two"]),
        )
        .with(
            Section::About,
            Script::new("R", "Host", Side::Right, &["alpha", "beta", "gamma", "delta"]),
        )
}

fn site_with(book: ScriptBook) -> Site<RecordingNarrator> {
    Site::with_scripts(
        SiteConfig::default(),
        book,
        RecordingNarrator::default(),
        Viewport::default(),
        &DeviceProfile::desktop(1280.0),
    )
}

fn phases(events: &[SiteEvent]) -> Vec<Phase> {
    events
        .iter()
        .filter_map(|e| match e {
            SiteEvent::Entrance(EntranceEvent::PhaseChanged(p)) => Some(*p),
            _ => None,
        })
        .collect()
}

fn about_only(section: Section) -> Option<RegionBounds> {
    (section == Section::About).then(|| RegionBounds::new(-100.0, 800.0))
}

#[test]
fn denied_permission_completes_at_8000ms_silently() {
    let mut site = site_with(two_section_book());
    site.choose_sound(false, 1_000.0);
    site.tick(8_999.0);
    assert!(!site.entrance().is_complete());
    site.tick(9_000.0);
    assert!(site.entrance().is_complete());

    let events = site.drain_events();
    let audio = events.iter().any(|e| {
        matches!(
            e,
            SiteEvent::Entrance(
                EntranceEvent::LoadSound | EntranceEvent::PlaySound | EntranceEvent::ReleaseSound
            )
        )
    });
    assert!(!audio);
    let completions = events
        .iter()
        .filter(|e| **e == SiteEvent::Entrance(EntranceEvent::Completed))
        .count();
    assert_eq!(completions, 1);
}

#[test]
fn granted_permission_walks_every_phase_in_order() {
    let mut site = site_with(two_section_book());
    site.choose_sound(true, 0.0);
    site.sound_ready(0.0);
    let mut seen = phases(&site.drain_events());
    let mut t = 0.0;
    while t <= 9_000.0 {
        site.tick(t);
        seen.extend(phases(&site.drain_events()));
        t += 16.0;
    }
    assert_eq!(
        seen,
        vec![
            Phase::Phase0,
            Phase::Phase1,
            Phase::Phase2,
            Phase::Phase3,
            Phase::Phase4,
            Phase::Exiting,
            Phase::Complete,
        ]
    );
}

#[test]
fn stalled_frame_fires_phases_back_to_back() {
    let mut site = site_with(two_section_book());
    site.choose_sound(true, 0.0);
    site.sound_ready(0.0);
    site.drain_events();
    site.tick(20_000.0);
    let events = site.drain_events();
    assert_eq!(phases(&events).len(), 6);
    // The glitch sound plays with the title and is released at completion.
    let play = events
        .iter()
        .position(|e| *e == SiteEvent::Entrance(EntranceEvent::PlaySound))
        .unwrap();
    let release = events
        .iter()
        .position(|e| *e == SiteEvent::Entrance(EntranceEvent::ReleaseSound))
        .unwrap();
    assert!(play < release);
}

#[test]
fn overlapping_regions_resolve_to_priority_order() {
    let mut site = site_with(two_section_book());
    site.choose_sound(false, 0.0);
    site.tick(8_000.0);
    let overlap = |s: Section| match s {
        Section::Projects | Section::Resume => Some(RegionBounds::new(0.0, 1_000.0)),
        _ => None,
    };
    site.scroll(3_000.0, 1_000.0, overlap);
    assert_eq!(site.active_section(), Section::Projects);
}

#[test]
fn hero_to_about_resets_the_dialogue() {
    let mut site = site_with(two_section_book());
    site.choose_sound(false, 0.0);
    site.tick(8_000.0);
    site.tick(9_000.0);
    assert_eq!(site.dialogue_click(9_000.0), ClickOutcome::Advanced);
    site.tick(9_060.0);
    assert_eq!(site.dialogue().message_index(), Some(1));
    assert!(!site.dialogue().typed_text().is_empty());

    site.scroll(900.0, 1_000.0, about_only);
    assert_eq!(site.dialogue().section(), Some(Section::About));
    assert_eq!(site.dialogue().message_index(), Some(0));
    assert_eq!(site.dialogue().typed_text(), "");
    assert_eq!(site.narrator().spoken.last().map(String::as_str), Some("alpha"));
}

#[test]
fn click_during_typing_reveals_full_text() {
    let mut site = site_with(two_section_book());
    site.choose_sound(false, 0.0);
    site.tick(8_000.0);
    site.tick(8_030.0);
    assert_eq!(site.dialogue().typed_text(), "o");
    assert_eq!(site.dialogue_click(8_040.0), ClickOutcome::Skipped);
    assert_eq!(site.dialogue().typed_text(), "one");
    site.tick(10_000.0);
    assert_eq!(site.dialogue().typed_text(), "one");
    assert_eq!(site.narrator().spoken, vec!["one", "one"]);
}

#[test]
fn about_dismisses_after_one_click_per_message() {
    let mut site = site_with(two_section_book());
    site.choose_sound(false, 0.0);
    site.tick(8_000.0);
    site.scroll(900.0, 1_000.0, about_only);

    let mut now = 8_000.0;
    let mut outcomes = Vec::new();
    for _ in 0..4 {
        now += 1_000.0;
        site.tick(now);
        outcomes.push(site.dialogue_click(now));
    }
    assert_eq!(
        outcomes,
        vec![
            ClickOutcome::Advanced,
            ClickOutcome::Advanced,
            ClickOutcome::Advanced,
            ClickOutcome::Dismissed,
        ]
    );
    assert!(!site.dialogue().is_visible());
    assert!(site.dialogue_view(now).is_none());
    assert_eq!(site.dialogue_click(now + 10.0), ClickOutcome::Ignored);
}

#[test]
fn impatient_clicks_need_two_per_message() {
    let mut site = site_with(two_section_book());
    site.choose_sound(false, 0.0);
    site.tick(8_000.0);
    site.scroll(900.0, 1_000.0, about_only);
    let clicks = (0..20)
        .map(|_| site.dialogue_click(8_000.0))
        .take_while(|o| *o != ClickOutcome::Dismissed)
        .count()
        + 1;
    assert_eq!(clicks, 8);
}

#[test]
fn trail_ignores_tiny_moves_and_retires_points() {
    let mut site = site_with(two_section_book());
    site.pointer_moved(100.0, 100.0);
    site.pointer_moved(101.0, 101.0);
    site.tick(16.0);
    assert_eq!(site.trail().unwrap().points().len(), 2);

    let mut surface = RecordingSurface::default();
    let mut last_age = 0.0;
    for frame in 1..=40 {
        site.tick(16.0 + frame as f64 * 16.0);
        site.render_trail(&mut surface);
        if let Some(p) = site.trail().unwrap().points().first() {
            assert!(p.age >= last_age);
            last_age = p.age;
        } else {
            assert!(surface.sprites.is_empty(), "retired points are never drawn");
        }
    }
    assert!(site.trail().unwrap().points().is_empty());
    assert_eq!(surface.clears, 40);
}

#[test]
fn engine_is_usable_standalone() {
    let mut trail = TrailEngine::new(Default::default(), 7, Viewport::new(800.0, 600.0, 2.0));
    assert_eq!(trail.pointer_moved(Vec2::new(0.0, 0.0)), 2);
    assert_eq!(trail.pointer_moved(Vec2::new(1.0, 0.0)), 0);
}
