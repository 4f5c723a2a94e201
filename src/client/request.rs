use super::validation;
use crate::types::{StyleId, DEFAULT_SPEED_SCALE};
use crate::Result;

/// One user-triggered synthesis: text, selected voice and speed.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub voice_id: StyleId,
    pub speed: f64,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, voice_id: StyleId) -> Self {
        Self {
            text: text.into(),
            voice_id,
            speed: DEFAULT_SPEED_SCALE,
        }
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Local checks only: non-empty text and speed in `0.8..=1.2`.
    pub fn validate(&self) -> Result<()> {
        validation::validate_text(&self.text)?;
        validation::validate_speed(self.speed)
    }
}
