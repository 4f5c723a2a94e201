//! Synthesis client: lifecycle state and the three service operations.

use crate::client::builder::SynthesisClientBuilder;
use crate::client::request::SpeechRequest;
use crate::client::validation;
use crate::transport::HttpTransport;
use crate::types::{AudioPayload, AudioQuery, StyleId, VoiceCatalog};
use crate::{Error, ErrorContext, Result};
use tracing::{debug, info, warn};

const SPEAKERS_PATH: &str = "/speakers";
const AUDIO_QUERY_PATH: &str = "/audio_query";
const SYNTHESIS_PATH: &str = "/synthesis";

/// Lifecycle state fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// The voice roster was fetched; operations talk to the service.
    Ready,
    /// The service was unreachable at construction. Terminal: every operation fails with
    /// [`Error::ServiceUnavailable`] without touching the network. Build a new client to
    /// recover.
    Degraded,
}

/// Client for a VOICEVOX-compatible speech service.
///
/// Construct once per session with [`SynthesisClient::builder`] (or
/// [`SynthesisClient::new`]) and pass it to whatever drives the UI. The three operations
/// are meant to be used in order: [`list_voices`](Self::list_voices) →
/// [`build_query`](Self::build_query) → [`synthesize`](Self::synthesize);
/// [`speak`](Self::speak) runs the last two for a validated [`SpeechRequest`].
///
/// Failures after construction never change the state; each call is independently
/// fallible and nothing is retried.
#[derive(Debug)]
pub struct SynthesisClient {
    transport: HttpTransport,
    voices: Option<VoiceCatalog>,
}

impl SynthesisClient {
    pub fn builder() -> SynthesisClientBuilder {
        SynthesisClientBuilder::new()
    }

    /// Connect to `http://<host>:<port>` with default transport settings.
    pub async fn new(host: &str, port: u16) -> Result<Self> {
        SynthesisClientBuilder::new()
            .host(host)
            .port(port)
            .connect()
            .await
    }

    pub(crate) async fn initialize(transport: HttpTransport) -> Result<Self> {
        match Self::fetch_voices(&transport).await {
            Ok(catalog) => {
                info!(
                    base_url = transport.base_url(),
                    speakers = catalog.len(),
                    "speech service ready"
                );
                let dups = catalog.duplicate_style_ids();
                if !dups.is_empty() {
                    warn!(?dups, "voice roster repeats style ids within a speaker");
                }
                Ok(Self {
                    transport,
                    voices: Some(catalog),
                })
            }
            Err(e) if e.is_unavailable() => {
                warn!(
                    base_url = transport.base_url(),
                    error = %e,
                    "speech service unreachable; client is degraded"
                );
                Ok(Self {
                    transport,
                    voices: None,
                })
            }
            Err(e) => Err(e),
        }
    }

    pub fn state(&self) -> ClientState {
        if self.voices.is_some() {
            ClientState::Ready
        } else {
            ClientState::Degraded
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == ClientState::Ready
    }

    /// Roster fetched at construction; `None` when degraded.
    pub fn voices(&self) -> Option<&VoiceCatalog> {
        self.voices.as_ref()
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    fn catalog(&self, operation: &str) -> Result<&VoiceCatalog> {
        self.voices.as_ref().ok_or_else(|| {
            Error::unavailable_with_context(
                "speech service was unreachable when the client was created",
                ErrorContext::new()
                    .with_source(operation)
                    .with_details("client is degraded; create a new client"),
            )
        })
    }

    async fn fetch_voices(transport: &HttpTransport) -> Result<VoiceCatalog> {
        transport.get_json(SPEAKERS_PATH).await
    }

    /// `GET /speakers`. Always hits the service; the cached roster is in [`voices`](Self::voices).
    pub async fn list_voices(&self) -> Result<VoiceCatalog> {
        self.catalog("list_voices")?;
        Self::fetch_voices(&self.transport).await
    }

    /// `POST /audio_query?text=..&speaker=..`.
    ///
    /// Empty text is not rejected here; the engine answers it with an empty (silent)
    /// query. Use [`SpeechRequest::validate`] or [`speak`](Self::speak) to reject it
    /// up front.
    pub async fn build_query(&self, text: &str, voice_id: StyleId) -> Result<AudioQuery> {
        let catalog = self.catalog("build_query")?;
        validation::validate_voice(catalog, voice_id)?;

        debug!(voice_id, chars = text.chars().count(), "building audio query");
        let params = [("text", text.to_string()), ("speaker", voice_id.to_string())];
        let query: AudioQuery = self
            .transport
            .post_for_json(AUDIO_QUERY_PATH, &params)
            .await?;
        Ok(query.with_voice_id(voice_id))
    }

    /// `POST /synthesis?speaker=..` with the query as JSON body.
    ///
    /// `voice_id` must be the one the query was built for. The returned bytes are not
    /// inspected.
    pub async fn synthesize(&self, query: &AudioQuery, voice_id: StyleId) -> Result<AudioPayload> {
        let catalog = self.catalog("synthesize")?;
        validation::validate_query_voice(query, voice_id)?;
        validation::validate_voice(catalog, voice_id)?;

        debug!(voice_id, speed_scale = ?query.speed_scale(), "synthesizing audio");
        let params = [("speaker", voice_id.to_string())];
        let response = self
            .transport
            .post_json_for_bytes(SYNTHESIS_PATH, &params, query)
            .await?;
        Ok(AudioPayload::new(response.body, response.content_type))
    }

    /// Validate `request`, build its query, apply the speed override and synthesize.
    pub async fn speak(&self, request: &SpeechRequest) -> Result<AudioPayload> {
        request.validate()?;
        let mut query = self.build_query(&request.text, request.voice_id).await?;
        query.apply_speed(request.speed);
        let payload = self.synthesize(&query, request.voice_id).await?;
        info!(
            voice_id = request.voice_id,
            bytes = payload.len(),
            "synthesis finished"
        );
        Ok(payload)
    }
}
