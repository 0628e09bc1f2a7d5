//! Speech synthesis narrator.

use folio_engine::{NarrationConfig, Narrator};
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance};

/// Reads dialogue lines aloud through the page's `speechSynthesis`.
/// Unavailable when the runtime has none; the dialogue then types silently.
pub struct SpeechNarrator {
    synth: Option<SpeechSynthesis>,
}

impl SpeechNarrator {
    pub fn detect() -> Self {
        let synth = web_sys::window().and_then(|w| w.speech_synthesis().ok());
        if synth.is_none() {
            log::info!("speech: synthesis not supported");
        }
        Self { synth }
    }
}

impl Narrator for SpeechNarrator {
    fn is_available(&self) -> bool {
        self.synth.is_some()
    }

    fn speak(&mut self, text: &str, voice: &NarrationConfig) {
        let Some(synth) = &self.synth else {
            return;
        };
        match SpeechSynthesisUtterance::new_with_text(text) {
            Ok(utterance) => {
                utterance.set_rate(voice.rate);
                utterance.set_pitch(voice.pitch);
                utterance.set_volume(voice.volume);
                synth.speak(&utterance);
            }
            Err(err) => log::warn!("speech: utterance rejected: {err:?}"),
        }
    }

    fn cancel(&mut self) {
        if let Some(synth) = &self.synth {
            synth.cancel();
        }
    }
}
