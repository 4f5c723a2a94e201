//! Voice roster returned by `GET /speakers`.

use serde::{Deserialize, Serialize};

/// Numeric style id; the only voice identifier the synthesis endpoints accept.
pub type StyleId = u32;

/// A style (tone, emotion) offered by a speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub name: String,
    pub id: StyleId,
}

/// A voice persona. Extra fields sent by the engine are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub name: String,
    #[serde(default)]
    pub styles: Vec<Style>,
}

impl Speaker {
    pub fn style(&self, id: StyleId) -> Option<&Style> {
        self.styles.iter().find(|s| s.id == id)
    }
}

/// One selectable entry of the flattened catalog, e.g. `"Alpha (Normal)"` → `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceOption {
    pub label: String,
    pub style_id: StyleId,
}

/// Ordered list of speakers, fetched once per client and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoiceCatalog {
    speakers: Vec<Speaker>,
}

impl VoiceCatalog {
    pub fn new(speakers: Vec<Speaker>) -> Self {
        Self { speakers }
    }

    pub fn speakers(&self) -> &[Speaker] {
        &self.speakers
    }

    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.speakers.len()
    }

    /// Flattens speakers and styles into selection entries, in catalog order.
    pub fn options(&self) -> Vec<VoiceOption> {
        self.speakers
            .iter()
            .flat_map(|speaker| {
                speaker.styles.iter().map(move |style| VoiceOption {
                    label: format!("{} ({})", speaker.name, style.name),
                    style_id: style.id,
                })
            })
            .collect()
    }

    /// Finds the speaker and style owning `id`.
    pub fn find_style(&self, id: StyleId) -> Option<(&Speaker, &Style)> {
        self.speakers
            .iter()
            .find_map(|speaker| speaker.style(id).map(|style| (speaker, style)))
    }

    pub fn contains_style(&self, id: StyleId) -> bool {
        self.find_style(id).is_some()
    }

    /// Style ids that occur more than once within a single speaker.
    pub fn duplicate_style_ids(&self) -> Vec<StyleId> {
        let mut dups = Vec::new();
        for speaker in &self.speakers {
            let mut seen = std::collections::HashSet::new();
            for style in &speaker.styles {
                if !seen.insert(style.id) && !dups.contains(&style.id) {
                    dups.push(style.id);
                }
            }
        }
        dups
    }
}
