//! Cinematic entrance: a permission prompt, then a fixed wall-clock timeline.
//!
//! ```text
//! PermissionPending --choice--> Phase0 --(sound ready | denied)--> timeline
//!   +500  Phase1   power button on, sparks start
//!   +2000 Phase2   title glitch (+ glitch sound if allowed)
//!   +3500 Phase3   primary tagline
//!   +4500 Phase4   secondary tagline
//!   +6500 Exiting  exit transition
//!   +8000 Complete completion signal, teardown
//! ```
//!
//! The sequencer never touches audio or the DOM itself. It queues
//! `EntranceEvent`s that the host drains and performs.

use crate::api::config::EntranceConfig;
use crate::api::error::FolioError;
use crate::api::types::AudioPermission;
use crate::core::time::Timeline;
use crate::systems::sparks::{Spark, SparkEmitter};

/// Entrance state. Ordered: a run only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    PermissionPending,
    Phase0,
    Phase1,
    Phase2,
    Phase3,
    Phase4,
    Exiting,
    Complete,
}

impl Phase {
    /// The 0..=4 phase counter the child displays key off.
    pub fn index(self) -> u8 {
        match self {
            Phase::PermissionPending | Phase::Phase0 => 0,
            Phase::Phase1 => 1,
            Phase::Phase2 => 2,
            Phase::Phase3 => 3,
            Phase::Phase4 | Phase::Exiting | Phase::Complete => 4,
        }
    }

    pub fn is_exiting(self) -> bool {
        matches!(self, Phase::Exiting | Phase::Complete)
    }
}

/// Requests from the sequencer to its host.
#[derive(Debug, Clone, PartialEq)]
pub enum EntranceEvent {
    /// Begin loading the glitch sound; answer with `sound_ready`/`sound_failed`.
    LoadSound,
    /// Rewind the loaded glitch sound and play it.
    PlaySound,
    /// Pause and drop any loaded glitch sound.
    ReleaseSound,
    PhaseChanged(Phase),
    Spark(Spark),
    /// Fired exactly once per successful run.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cue {
    PowerOn,
    Title,
    PrimaryTagline,
    SecondaryTagline,
    Exit,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SoundState {
    /// Nothing requested (sound denied, or not decided yet).
    Idle,
    Loading { since: f64 },
    Ready,
    /// Load failed or timed out; the run continues silently.
    Unavailable,
}

pub struct EntranceSequencer {
    config: EntranceConfig,
    permission: AudioPermission,
    phase: Phase,
    sound: SoundState,
    timeline: Timeline<Cue>,
    sparks: SparkEmitter,
    completed: bool,
    events: Vec<EntranceEvent>,
}

impl EntranceSequencer {
    pub fn new(config: EntranceConfig, seed: u64) -> Self {
        let timeline = Timeline::new(vec![
            (config.power_on_ms, Cue::PowerOn),
            (config.title_ms, Cue::Title),
            (config.primary_tagline_ms, Cue::PrimaryTagline),
            (config.secondary_tagline_ms, Cue::SecondaryTagline),
            (config.exit_ms, Cue::Exit),
            (config.complete_ms, Cue::Complete),
        ]);
        let sparks = SparkEmitter::new(config.spark_period_ms, seed);
        Self {
            config,
            permission: AudioPermission::Unset,
            phase: Phase::PermissionPending,
            sound: SoundState::Idle,
            timeline,
            sparks,
            completed: false,
            events: Vec::new(),
        }
    }

    /// Record the user's sound choice and leave `PermissionPending`.
    /// A second choice without `reset_permission` is ignored.
    pub fn choose(&mut self, allowed: bool, now: f64) {
        if self.permission.is_resolved() {
            log::debug!("entrance: permission already {:?}", self.permission);
            return;
        }
        self.permission = AudioPermission::from_choice(allowed);
        self.set_phase(Phase::Phase0);

        if allowed {
            log::info!("entrance: sound allowed, loading glitch sound");
            self.sound = SoundState::Loading { since: now };
            self.events.push(EntranceEvent::LoadSound);
        } else {
            log::info!("entrance: sound declined");
            self.start_timeline(now);
        }
    }

    /// The glitch sound can play through.
    pub fn sound_ready(&mut self, now: f64) {
        if let SoundState::Loading { .. } = self.sound {
            log::info!("entrance: glitch sound ready");
            self.sound = SoundState::Ready;
            self.start_timeline(now);
        }
    }

    /// The glitch sound will never be ready. The run goes on without it.
    pub fn sound_failed(&mut self, now: f64, error: &FolioError) {
        if let SoundState::Loading { .. } = self.sound {
            log::warn!("entrance: {error}; continuing without sound");
            self.sound = SoundState::Unavailable;
            self.start_timeline(now);
        }
    }

    /// Advance to `now`: fire due cues in order, then due sparks.
    pub fn tick(&mut self, now: f64) {
        if let SoundState::Loading { since } = self.sound {
            if now - since >= self.config.sound_load_timeout_ms {
                let err = FolioError::AssetLoad("glitch sound timed out".into());
                self.sound_failed(now, &err);
            }
        }

        for cue in self.timeline.poll(now) {
            self.apply(cue);
        }

        for spark in self.sparks.poll(now) {
            self.events.push(EntranceEvent::Spark(spark));
        }
    }

    fn start_timeline(&mut self, now: f64) {
        self.timeline.start(now);
    }

    fn apply(&mut self, cue: Cue) {
        match cue {
            Cue::PowerOn => {
                self.set_phase(Phase::Phase1);
                // Anchor the spark cadence to the cue deadline, not the frame.
                if let Some(at) = self.timeline.deadline(self.config.power_on_ms) {
                    self.sparks.start(at);
                }
            }
            Cue::Title => {
                self.set_phase(Phase::Phase2);
                if self.sound == SoundState::Ready {
                    self.events.push(EntranceEvent::PlaySound);
                }
            }
            Cue::PrimaryTagline => self.set_phase(Phase::Phase3),
            Cue::SecondaryTagline => self.set_phase(Phase::Phase4),
            Cue::Exit => self.set_phase(Phase::Exiting),
            Cue::Complete => {
                self.set_phase(Phase::Complete);
                if !self.completed {
                    self.completed = true;
                    self.events.push(EntranceEvent::Completed);
                }
                self.teardown();
            }
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if phase <= self.phase {
            return;
        }
        log::debug!("entrance: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.events.push(EntranceEvent::PhaseChanged(phase));
    }

    /// Cancel pending cues and sparks and release any sound. Safe to call
    /// more than once; nothing scheduled fires afterwards.
    pub fn teardown(&mut self) {
        self.timeline.cancel();
        self.sparks.stop();
        if matches!(self.sound, SoundState::Loading { .. } | SoundState::Ready) {
            self.events.push(EntranceEvent::ReleaseSound);
        }
        self.sound = SoundState::Idle;
    }

    /// Forget the permission choice and return to `PermissionPending` with a
    /// fresh timeline. Any loaded sound is released first.
    pub fn reset_permission(&mut self) {
        self.teardown();
        self.timeline.reset();
        self.permission = AudioPermission::Unset;
        self.completed = false;
        self.phase = Phase::PermissionPending;
        self.events.push(EntranceEvent::PhaseChanged(Phase::PermissionPending));
    }

    pub fn drain_events(&mut self) -> Vec<EntranceEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn permission(&self) -> AudioPermission {
        self.permission
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// True while the permission is granted but the sound is still loading.
    pub fn is_waiting_for_sound(&self) -> bool {
        matches!(self.sound, SoundState::Loading { .. })
    }

    pub fn timeline_started_at(&self) -> Option<f64> {
        self.timeline.start_time()
    }

    pub fn config(&self) -> &EntranceConfig {
        &self.config
    }

    pub fn view(&self) -> EntranceView {
        EntranceView::from_phase(self.phase)
    }
}

/// What the entrance overlay shows at a given phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntranceView {
    pub permission_prompt: bool,
    pub overlay_visible: bool,
    pub power_active: bool,
    pub title_visible: bool,
    /// The glitch effect only runs during Phase2 itself.
    pub title_glitching: bool,
    pub primary_tagline_visible: bool,
    pub secondary_tagline_visible: bool,
    pub exiting: bool,
}

impl EntranceView {
    pub fn from_phase(phase: Phase) -> Self {
        let i = phase.index();
        Self {
            permission_prompt: phase == Phase::PermissionPending,
            overlay_visible: i > 0,
            power_active: i >= 1,
            title_visible: i >= 2,
            title_glitching: phase == Phase::Phase2,
            primary_tagline_visible: i >= 3,
            secondary_tagline_visible: i >= 4,
            exiting: phase.is_exiting(),
        }
    }
}
