//! Audio query document exchanged between `/audio_query` and `/synthesis`.

use super::speaker::StyleId;
use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key of the playback speed multiplier inside the query document.
pub const SPEED_SCALE_KEY: &str = "speedScale";

/// Speed at which no override is written into the query.
pub const DEFAULT_SPEED_SCALE: f64 = 1.0;

const SPEED_EPSILON: f64 = 1e-9;

/// Semi-structured audio query.
///
/// The engine owns the schema; this type keeps every field it sends and only exposes a
/// typed accessor for `speedScale`. The style id the query was built for is tracked out
/// of band and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioQuery {
    fields: Map<String, Value>,
    #[serde(skip)]
    voice_id: Option<StyleId>,
}

impl AudioQuery {
    /// Wraps a raw JSON document. The result is not tied to any voice id.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self {
                fields,
                voice_id: None,
            }),
            other => Err(Error::invalid_input_with_context(
                "audio query must be a JSON object",
                ErrorContext::new()
                    .with_source("audio_query")
                    .with_details(json_kind(&other)),
            )),
        }
    }

    pub(crate) fn with_voice_id(mut self, voice_id: StyleId) -> Self {
        self.voice_id = Some(voice_id);
        self
    }

    /// Style id passed to `build_query` when this query was produced, if any.
    pub fn voice_id(&self) -> Option<StyleId> {
        self.voice_id
    }

    pub fn speed_scale(&self) -> Option<f64> {
        self.fields.get(SPEED_SCALE_KEY).and_then(Value::as_f64)
    }

    pub fn set_speed_scale(&mut self, speed: f64) {
        self.fields
            .insert(SPEED_SCALE_KEY.to_string(), Value::from(speed));
    }

    /// Writes `speed` into the query unless it equals the default of 1.0.
    ///
    /// Returns whether the document was modified.
    pub fn apply_speed(&mut self, speed: f64) -> bool {
        if (speed - DEFAULT_SPEED_SCALE).abs() < SPEED_EPSILON {
            return false;
        }
        self.set_speed_scale(speed);
        true
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
