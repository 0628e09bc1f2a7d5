//! Story guide scripts, one per section.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::types::{Section, Side};

/// A speaker and their ordered lines for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub glyph: String,
    pub speaker: String,
    pub messages: Vec<String>,
    pub side: Side,
}

impl Script {
    pub fn new(glyph: &str, speaker: &str, side: Side, messages: &[&str]) -> Self {
        Self {
            glyph: glyph.into(),
            speaker: speaker.into(),
            messages: messages.iter().map(|m| (*m).to_owned()).collect(),
            side,
        }
    }
}

/// Section -> script lookup. Sections without an entry have no dialogue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptBook {
    scripts: HashMap<Section, Script>,
}

impl ScriptBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, section: Section, script: Script) -> Self {
        self.scripts.insert(section, script);
        self
    }

    pub fn get(&self, section: Section) -> Option<&Script> {
        self.scripts.get(&section)
    }

    /// The portfolio's own guide lines.
    pub fn portfolio() -> Self {
        Self::new()
            .with(
                Section::Hero,
                Script::new("🧙‍♂️", "Guide", Side::Left, &[
                    "Welcome! I'm excited to introduce you to Ramachandra Udupa's digital realm!",
                    "He's a talented BE student specializing in AI & DS at SMVITM Bantakal.",
                    "With expertise in Full Stack Development, AI/ML, and Deep Learning, he's ready to turn ideas into reality.",
                    "Shall we explore his journey together?",
                ]),
            )
            .with(
                Section::About,
                Script::new("👨‍💻", "Ramachandra", Side::Right, &[
                    "Let me share my story with you...",
                    "My journey in tech began with a passion for solving complex problems.",
                    "At SMVITM Bantakal, I've been honing my skills in AI, DS, and Full Stack Development.",
                    "Every project is an opportunity to learn and create something meaningful.",
                ]),
            )
            .with(
                Section::Skills,
                Script::new("🚀", "Tech Mentor", Side::Left, &[
                    "Let me walk you through my technical arsenal!",
                    "From Python and Java to cutting-edge AI technologies, I've developed a diverse skill set.",
                    "I specialize in AI/ML development while maintaining strong full-stack capabilities.",
                    "My journey also includes game development, cybersecurity, and cloud technologies.",
                ]),
            )
            .with(
                Section::Projects,
                Script::new("⚡", "Tech Explorer", Side::Left, &[
                    "Welcome to my project showcase!",
                    "Each project here represents a unique challenge and solution.",
                    "From AI-powered applications to full-stack platforms, these projects demonstrate my technical versatility.",
                    "Feel free to explore the live demos and code repositories!",
                ]),
            )
            .with(
                Section::Resume,
                Script::new("📄", "Career Guide", Side::Right, &[
                    "Let me walk you through my professional journey!",
                    "I've had the opportunity to work on exciting projects in both AI and Full Stack Development.",
                    "My education in AI & DS at SMVITM has provided a strong foundation for my work.",
                    "Feel free to download my resume for more details about my experience and skills!",
                ]),
            )
            .with(
                Section::Contact,
                Script::new("📬", "Connection Guide", Side::Left, &[
                    "Ready to connect? You're in the right place!",
                    "Feel free to reach out through the contact form or social media.",
                    "Whether it's a project idea, collaboration, or just to say hi.",
                    "I'm always excited to connect with fellow tech enthusiasts!",
                ]),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_has_four_lines() {
        let book = ScriptBook::portfolio();
        for s in Section::ALL {
            let script = book.get(s).unwrap();
            assert_eq!(script.messages.len(), 4, "{s:?}");
            assert!(script.messages.iter().all(|m| !m.is_empty()));
        }
    }

    #[test]
    fn sides_alternate_where_expected() {
        let book = ScriptBook::portfolio();
        assert_eq!(book.get(Section::About).unwrap().side, Side::Right);
        assert_eq!(book.get(Section::Hero).unwrap().side, Side::Left);
    }

    #[test]
    fn empty_book_has_no_dialogue() {
        assert!(ScriptBook::new().get(Section::Hero).is_none());
    }
}
