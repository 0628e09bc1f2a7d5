//! Background music instruction.

use crate::api::config::AmbientConfig;
use crate::api::error::FolioError;

/// What the host should do to its audio element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmbientCommand {
    Play { volume: f64 },
    Pause { volume: f64 },
}

/// Holds the play/pause instruction. Every change yields exactly one
/// command; repeating the current instruction yields none.
pub struct AmbientAudio {
    volume: f64,
    playing: bool,
}

impl AmbientAudio {
    pub fn new(config: &AmbientConfig) -> Self {
        Self {
            volume: config.volume.clamp(0.0, 1.0),
            playing: false,
        }
    }

    pub fn set_playing(&mut self, playing: bool) -> Option<AmbientCommand> {
        if playing == self.playing {
            return None;
        }
        self.playing = playing;
        Some(self.command())
    }

    pub fn toggle(&mut self) -> AmbientCommand {
        self.playing = !self.playing;
        self.command()
    }

    /// The runtime declined to start playback. The instruction stands so the
    /// next toggle still flips it.
    pub fn playback_rejected(&self, err: &FolioError) {
        log::warn!("ambient: {err}");
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Speaker glyph for the toggle button.
    pub fn indicator(&self) -> &'static str {
        if self.playing {
            "🔊"
        } else {
            "🔈"
        }
    }

    fn command(&self) -> AmbientCommand {
        if self.playing {
            AmbientCommand::Play {
                volume: self.volume,
            }
        } else {
            AmbientCommand::Pause {
                volume: self.volume,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audio() -> AmbientAudio {
        AmbientAudio::new(&AmbientConfig::default())
    }

    #[test]
    fn starts_paused_and_quiet() {
        let a = audio();
        assert!(!a.is_playing());
        assert_eq!(a.volume(), 0.17);
        assert_eq!(a.indicator(), "🔈");
    }

    #[test]
    fn only_changes_produce_commands() {
        let mut a = audio();
        assert_eq!(a.set_playing(false), None);
        assert_eq!(a.set_playing(true), Some(AmbientCommand::Play { volume: 0.17 }));
        assert_eq!(a.set_playing(true), None);
    }

    #[test]
    fn toggle_flips_and_survives_rejection() {
        let mut a = audio();
        assert_eq!(a.toggle(), AmbientCommand::Play { volume: 0.17 });
        a.playback_rejected(&FolioError::PlaybackRejected("NotAllowedError".into()));
        assert!(a.is_playing());
        assert_eq!(a.toggle(), AmbientCommand::Pause { volume: 0.17 });
    }
}
