//! Data types exchanged with the speech service.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`VoiceCatalog`] | Ordered speakers returned by `GET /speakers` |
//! | [`Speaker`] / [`Style`] | A voice persona and its selectable styles |
//! | [`AudioQuery`] | Semi-structured synthesis plan from `POST /audio_query` |
//! | [`AudioPayload`] | Opaque audio bytes from `POST /synthesis` |
//!
//! ## Example
//!
//! ```rust
//! use voicevox_client::types::{AudioQuery, VoiceCatalog};
//!
//! let catalog: VoiceCatalog = serde_json::from_str(
//!     r#"[{"name":"Alpha","styles":[{"name":"Normal","id":1}]}]"#,
//! ).unwrap();
//! assert_eq!(catalog.options()[0].label, "Alpha (Normal)");
//!
//! let mut query = AudioQuery::from_value(serde_json::json!({"speedScale": 1.0})).unwrap();
//! query.apply_speed(1.2);
//! assert_eq!(query.speed_scale(), Some(1.2));
//! ```

pub mod audio;
pub mod query;
pub mod speaker;

pub use audio::{AudioFormat, AudioPayload};
pub use query::{AudioQuery, DEFAULT_SPEED_SCALE, SPEED_SCALE_KEY};
pub use speaker::{Speaker, Style, StyleId, VoiceCatalog, VoiceOption};
