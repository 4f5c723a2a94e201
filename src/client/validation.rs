//! Caller-side checks performed before any request leaves the process.

use crate::types::{AudioQuery, StyleId, VoiceCatalog};
use crate::{Error, ErrorContext, Result};

pub const MIN_SPEED_SCALE: f64 = 0.8;
pub const MAX_SPEED_SCALE: f64 = 1.2;

// Slider steps of 0.1 accumulate float error; accept values within this of the bounds.
const SPEED_TOLERANCE: f64 = 1e-6;

/// Only the empty string is rejected; whitespace is passed to the engine as is.
pub(crate) fn validate_text(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(Error::invalid_input_with_context(
            "Please enter some text to synthesize",
            ErrorContext::new()
                .with_field_path("request.text")
                .with_source("request_validator"),
        ));
    }
    Ok(())
}

pub(crate) fn validate_speed(speed: f64) -> Result<()> {
    if !speed.is_finite()
        || speed < MIN_SPEED_SCALE - SPEED_TOLERANCE
        || speed > MAX_SPEED_SCALE + SPEED_TOLERANCE
    {
        return Err(Error::invalid_input_with_context(
            format!(
                "Speed must be between {} and {}",
                MIN_SPEED_SCALE, MAX_SPEED_SCALE
            ),
            ErrorContext::new()
                .with_field_path("request.speed")
                .with_details(speed.to_string())
                .with_source("request_validator"),
        ));
    }
    Ok(())
}

/// Rejects style ids the catalog does not offer.
pub(crate) fn validate_voice(catalog: &VoiceCatalog, voice_id: StyleId) -> Result<()> {
    if !catalog.contains_style(voice_id) {
        return Err(Error::invalid_input_with_context(
            format!("Unknown voice id: {}", voice_id),
            ErrorContext::new()
                .with_field_path("speaker")
                .with_source("voice_validator"),
        ));
    }
    Ok(())
}

/// A query built for one voice must not be synthesized with another.
pub(crate) fn validate_query_voice(query: &AudioQuery, voice_id: StyleId) -> Result<()> {
    match query.voice_id() {
        Some(built_for) if built_for != voice_id => Err(Error::invalid_input_with_context(
            format!(
                "Audio query was built for voice {} but synthesis requested voice {}",
                built_for, voice_id
            ),
            ErrorContext::new()
                .with_field_path("speaker")
                .with_source("query_validator"),
        )),
        _ => Ok(()),
    }
}
