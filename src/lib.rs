//! # voicevox-client
//!
//! Client for a locally running VOICEVOX-compatible text-to-speech engine.
//!
//! ## Overview
//!
//! Speech is produced in three steps, each one HTTP exchange with the engine:
//!
//! 1. `GET /speakers` → [`VoiceCatalog`] (fetched once when the client is created)
//! 2. `POST /audio_query` → [`AudioQuery`] for a text and a style id
//! 3. `POST /synthesis` → [`AudioPayload`] (opaque audio bytes, normally WAV)
//!
//! [`SynthesisClient`] wraps those steps. If the engine is not reachable when the client
//! is created, the client is *degraded*: it keeps no roster and every later call fails
//! with [`Error::ServiceUnavailable`] without touching the network.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use voicevox_client::{SpeechRequest, SynthesisClient};
//!
//! #[tokio::main]
//! async fn main() -> voicevox_client::Result<()> {
//!     let client = SynthesisClient::new("127.0.0.1", 50021).await?;
//!     let Some(voices) = client.voices() else {
//!         eprintln!("start the speech engine first");
//!         return Ok(());
//!     };
//!     let voice = &voices.options()[0];
//!
//!     let audio = client
//!         .speak(&SpeechRequest::new("こんにちは", voice.style_id).speed(1.1))
//!         .await?;
//!     std::fs::write("hello.wav", audio.as_bytes())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Synthesis client, builder, request validation |
//! | [`types`] | Voice catalog, audio query and payload types |
//! | [`transport`] | HTTP transport and error mapping |
//! | [`error_code`] | Classification of failures for front ends |

pub mod client;
pub mod error_code;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{
    ClientConfig, ClientState, SpeechRequest, SynthesisClient, SynthesisClientBuilder,
};
pub use error_code::ErrorClass;
pub use types::{
    AudioFormat, AudioPayload, AudioQuery, Speaker, Style, StyleId, VoiceCatalog, VoiceOption,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
