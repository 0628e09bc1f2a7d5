//! Story guide dialogue driver.
//!
//! One session per active section. A session types its current message one
//! character per interval, narrates the whole message when typing starts, and
//! advances on click. Changing section destroys the session outright.

use crate::api::config::{DialogueConfig, NarrationConfig};
use crate::api::types::{Section, Side};
use crate::content::scripts::{Script, ScriptBook};
use crate::core::time::IntervalTimer;
use crate::extensions::easing::{ease, there_and_back, Easing};

/// Speech capability. The host's synthesizer is a process-wide singleton,
/// so every `speak` is preceded by a `cancel`.
pub trait Narrator {
    fn is_available(&self) -> bool {
        true
    }
    fn speak(&mut self, text: &str, voice: &NarrationConfig);
    fn cancel(&mut self);
}

/// Used when the runtime has no speech synthesis.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn is_available(&self) -> bool {
        false
    }
    fn speak(&mut self, _text: &str, _voice: &NarrationConfig) {}
    fn cancel(&mut self) {}
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No visible dialogue.
    Ignored,
    /// Typing was cut short; the full message is shown.
    Skipped,
    /// Moved on to the next message.
    Advanced,
    /// Last message acknowledged; the box is hidden until the section changes.
    Dismissed,
}

struct DialogueSession {
    section: Section,
    index: usize,
    /// Characters of the current message revealed so far.
    revealed: usize,
    typing: bool,
    visible: bool,
    typer: IntervalTimer,
    shown_at: f64,
}

/// Everything the host needs to paint the dialogue box for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueView {
    pub section: Section,
    pub glyph: String,
    pub speaker: String,
    pub text: String,
    pub typing: bool,
    pub side: Side,
    pub index: usize,
    pub total: usize,
    /// Horizontal slide-in offset in CSS pixels, signed toward the anchor side.
    pub box_offset: f32,
    pub box_opacity: f32,
    /// Vertical glyph bob in CSS pixels (negative is up).
    pub bob_offset: f32,
    pub cursor_opacity: f32,
    pub show_continue: bool,
}

pub struct DialogueDriver {
    config: DialogueConfig,
    scripts: ScriptBook,
    session: Option<DialogueSession>,
    /// Bumped on every section activation so hosts can spot a new session.
    revision: u64,
}

impl DialogueDriver {
    pub fn new(config: DialogueConfig, scripts: ScriptBook) -> Self {
        Self {
            config,
            scripts,
            session: None,
            revision: 0,
        }
    }

    /// Start a fresh run for `section`, discarding any previous session.
    pub fn activate<N: Narrator + ?Sized>(&mut self, section: Section, now: f64, narrator: &mut N) {
        self.teardown(narrator);
        self.revision += 1;
        if self.scripts.get(section).is_none() {
            log::debug!("dialogue: no script for {:?}", section);
            return;
        }
        self.session = Some(DialogueSession {
            section,
            index: 0,
            revealed: 0,
            typing: true,
            visible: true,
            typer: IntervalTimer::new(self.config.typing_interval_ms),
            shown_at: now,
        });
        self.start_message(now, narrator);
    }

    /// Reveal characters due by `now`. A message is marked typed on the
    /// interval after its last character appears.
    pub fn tick(&mut self, now: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.typing {
            return;
        }
        let Some(len) = self
            .scripts
            .get(session.section)
            .and_then(|s| s.messages.get(session.index))
            .map(|m| m.chars().count())
        else {
            return;
        };
        for _ in 0..session.typer.poll(now) {
            if session.revealed < len {
                session.revealed += 1;
            } else {
                session.typing = false;
                session.typer.stop();
                break;
            }
        }
    }

    pub fn click<N: Narrator + ?Sized>(&mut self, now: f64, narrator: &mut N) -> ClickOutcome {
        let Some(session) = self.session.as_mut() else {
            return ClickOutcome::Ignored;
        };
        if !session.visible {
            return ClickOutcome::Ignored;
        }
        let Some(script) = self.scripts.get(session.section) else {
            return ClickOutcome::Ignored;
        };

        if session.typing {
            let message = script.messages.get(session.index).map(String::as_str).unwrap_or("");
            session.revealed = message.chars().count();
            session.typing = false;
            session.typer.stop();
            narrate(narrator, message, &self.config.narration);
            return ClickOutcome::Skipped;
        }

        if session.index + 1 < script.messages.len() {
            session.index += 1;
            self.start_message(now, narrator);
            ClickOutcome::Advanced
        } else {
            session.visible = false;
            session.typer.stop();
            if narrator.is_available() {
                narrator.cancel();
            }
            log::debug!("dialogue: {:?} dismissed", session.section);
            ClickOutcome::Dismissed
        }
    }

    /// Cancel narration and drop the session.
    pub fn teardown<N: Narrator + ?Sized>(&mut self, narrator: &mut N) {
        if self.session.take().is_some() && narrator.is_available() {
            narrator.cancel();
        }
    }

    fn start_message<N: Narrator + ?Sized>(&mut self, now: f64, narrator: &mut N) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.revealed = 0;
        session.typing = true;
        session.typer.start(now);
        if let Some(message) = self
            .scripts
            .get(session.section)
            .and_then(|s| s.messages.get(session.index))
        {
            narrate(narrator, message, &self.config.narration);
        }
    }

    fn current(&self) -> Option<(&DialogueSession, &Script)> {
        let session = self.session.as_ref()?;
        let script = self.scripts.get(session.section)?;
        Some((session, script))
    }

    pub fn is_visible(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.visible)
    }

    pub fn is_typing(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.typing)
    }

    pub fn section(&self) -> Option<Section> {
        self.session.as_ref().map(|s| s.section)
    }

    pub fn message_index(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.index)
    }

    /// Text revealed so far for the current message.
    pub fn typed_text(&self) -> String {
        self.current()
            .and_then(|(session, script)| {
                script
                    .messages
                    .get(session.index)
                    .map(|m| m.chars().take(session.revealed).collect())
            })
            .unwrap_or_default()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn scripts(&self) -> &ScriptBook {
        &self.scripts
    }

    /// Paint state at `now`, or `None` when nothing is shown.
    pub fn view(&self, now: f64) -> Option<DialogueView> {
        let (session, script) = self.current()?;
        if !session.visible {
            return None;
        }
        let cfg = &self.config;
        let since = (now - session.shown_at).max(0.0);

        let entry = if cfg.box_entry_ms > 0.0 {
            (since / cfg.box_entry_ms) as f32
        } else {
            1.0
        };
        let direction = match script.side {
            Side::Left => -1.0,
            Side::Right => 1.0,
        };
        let box_offset = ease(cfg.box_entry_offset * direction, 0.0, entry, Easing::QuadOut);
        let box_opacity = ease(0.0, 1.0, entry, Easing::QuadOut);

        let bob_offset = cycle(since, cfg.bob_period_ms)
            .map(|t| there_and_back(0.0, -cfg.bob_height, t, Easing::SineInOut))
            .unwrap_or(0.0);
        let cursor_opacity = cycle(since, cfg.cursor_blink_ms)
            .map(|t| there_and_back(1.0, 0.0, t, Easing::Linear))
            .unwrap_or(1.0);

        Some(DialogueView {
            section: session.section,
            glyph: script.glyph.clone(),
            speaker: script.speaker.clone(),
            text: self.typed_text(),
            typing: session.typing,
            side: script.side,
            index: session.index,
            total: script.messages.len(),
            box_offset,
            box_opacity,
            bob_offset,
            cursor_opacity,
            show_continue: !session.typing,
        })
    }
}

fn narrate<N: Narrator + ?Sized>(narrator: &mut N, text: &str, voice: &NarrationConfig) {
    if !narrator.is_available() {
        return;
    }
    narrator.cancel();
    narrator.speak(text, voice);
}

/// Phase within a repeating cycle, or `None` for a zero period.
fn cycle(elapsed: f64, period: f64) -> Option<f32> {
    (period > 0.0).then(|| ((elapsed % period) / period) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log {
        calls: Vec<String>,
    }

    impl Narrator for Log {
        fn speak(&mut self, text: &str, _voice: &NarrationConfig) {
            self.calls.push(format!("speak:{text}"));
        }
        fn cancel(&mut self) {
            self.calls.push("cancel".into());
        }
    }

    fn book() -> ScriptBook {
        ScriptBook::new()
            .with(Section::Hero, Script::new("A", "Alpha", Side::Left, &["hi", "yo"]))
            .with(Section::About, Script::new("B", "Beta", Side::Right, &["abc"]))
    }

    fn driver() -> DialogueDriver {
        DialogueDriver::new(DialogueConfig::default(), book())
    }

    #[test]
    fn activation_resets_and_narrates_whole_message() {
        let mut d = driver();
        let mut n = Log::default();
        d.activate(Section::Hero, 0.0, &mut n);
        assert!(d.is_visible());
        assert!(d.is_typing());
        assert_eq!(d.typed_text(), "");
        assert_eq!(n.calls, vec!["cancel", "speak:hi"]);
    }

    #[test]
    fn typing_reveals_one_char_per_interval() {
        let mut d = driver();
        d.activate(Section::Hero, 0.0, &mut SilentNarrator);
        d.tick(29.0);
        assert_eq!(d.typed_text(), "");
        d.tick(30.0);
        assert_eq!(d.typed_text(), "h");
        d.tick(60.0);
        assert_eq!(d.typed_text(), "hi");
        assert!(d.is_typing(), "completion lands one interval later");
        d.tick(90.0);
        assert!(!d.is_typing());
    }

    #[test]
    fn stalled_frame_catches_up() {
        let mut d = driver();
        d.activate(Section::About, 0.0, &mut SilentNarrator);
        d.tick(1_000.0);
        assert_eq!(d.typed_text(), "abc");
        assert!(!d.is_typing());
    }

    #[test]
    fn click_while_typing_shows_full_text_and_renarrates() {
        let mut d = driver();
        let mut n = Log::default();
        d.activate(Section::Hero, 0.0, &mut n);
        d.tick(30.0);
        assert_eq!(d.click(40.0, &mut n), ClickOutcome::Skipped);
        assert_eq!(d.typed_text(), "hi");
        assert!(!d.is_typing());
        assert_eq!(n.calls, vec!["cancel", "speak:hi", "cancel", "speak:hi"]);
        // Nothing else is revealed later.
        d.tick(5_000.0);
        assert_eq!(d.typed_text(), "hi");
    }

    #[test]
    fn click_after_typing_advances_then_dismisses() {
        let mut d = driver();
        let mut n = Log::default();
        d.activate(Section::Hero, 0.0, &mut n);
        d.tick(1_000.0);
        assert_eq!(d.click(1_000.0, &mut n), ClickOutcome::Advanced);
        assert_eq!(d.message_index(), Some(1));
        assert_eq!(d.typed_text(), "");
        assert!(d.is_typing());
        d.tick(2_000.0);
        assert_eq!(d.click(2_000.0, &mut n), ClickOutcome::Dismissed);
        assert!(!d.is_visible());
        assert!(d.view(2_000.0).is_none());
        assert_eq!(d.click(2_100.0, &mut n), ClickOutcome::Ignored);
    }

    #[test]
    fn section_change_discards_progress() {
        let mut d = driver();
        let mut n = Log::default();
        d.activate(Section::Hero, 0.0, &mut n);
        d.tick(1_000.0);
        d.click(1_000.0, &mut n);
        d.tick(1_030.0);
        d.activate(Section::About, 1_040.0, &mut n);
        assert_eq!(d.message_index(), Some(0));
        assert_eq!(d.typed_text(), "");
        assert_eq!(d.revision(), 2);
        assert_eq!(n.calls.last().map(String::as_str), Some("speak:abc"));
    }

    #[test]
    fn unscripted_section_has_no_dialogue() {
        let mut d = driver();
        let mut n = Log::default();
        d.activate(Section::Hero, 0.0, &mut n);
        n.calls.clear();
        d.activate(Section::Contact, 10.0, &mut n);
        assert!(!d.is_visible());
        assert_eq!(n.calls, vec!["cancel"]);
        assert_eq!(d.click(20.0, &mut n), ClickOutcome::Ignored);
    }

    #[test]
    fn silent_narrator_is_never_called_through() {
        let mut d = driver();
        d.activate(Section::Hero, 0.0, &mut SilentNarrator);
        assert_eq!(d.click(1.0, &mut SilentNarrator), ClickOutcome::Skipped);
    }

    #[test]
    fn view_slides_in_from_anchor_side() {
        let mut d = driver();
        d.activate(Section::About, 0.0, &mut SilentNarrator);
        let start = d.view(0.0).unwrap();
        assert_eq!(start.box_offset, 50.0);
        assert_eq!(start.box_opacity, 0.0);
        assert_eq!(start.side, Side::Right);
        let settled = d.view(300.0).unwrap();
        assert_eq!(settled.box_offset, 0.0);
        assert_eq!(settled.box_opacity, 1.0);
        assert!(!settled.show_continue);
    }

    #[test]
    fn glyph_bobs_and_cursor_blinks() {
        let mut d = driver();
        d.activate(Section::Hero, 0.0, &mut SilentNarrator);
        let peak = d.view(1_000.0).unwrap();
        assert!((peak.bob_offset + 5.0).abs() < 1e-4);
        let dim = d.view(400.0).unwrap();
        assert!(dim.cursor_opacity.abs() < 1e-4);
        assert_eq!(d.view(800.0).unwrap().cursor_opacity, 1.0);
    }

    #[test]
    fn continue_hint_follows_typing() {
        let mut d = driver();
        d.activate(Section::Hero, 0.0, &mut SilentNarrator);
        d.tick(1_000.0);
        let v = d.view(1_000.0).unwrap();
        assert!(v.show_continue);
        assert_eq!(v.text, "hi");
        assert_eq!(v.total, 2);
    }
}
