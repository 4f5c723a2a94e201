//! Synthesis client for the speech service.
//!
//! Keep the public surface small: one client, one builder, one request type.
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
pub mod request;
pub mod validation;

pub use builder::{ClientConfig, SynthesisClientBuilder, DEFAULT_HOST, DEFAULT_PORT};
pub use self::core::{ClientState, SynthesisClient};
pub use request::SpeechRequest;
pub use validation::{MAX_SPEED_SCALE, MIN_SPEED_SCALE};
