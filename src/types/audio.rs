//! Synthesized audio returned by `/synthesis`.

use bytes::Bytes;

/// Opaque audio bytes as produced by the service.
///
/// No decoding or validation happens here; [`AudioPayload::format`] only looks at the
/// first few bytes so callers can pick a player or file extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPayload {
    data: Bytes,
    content_type: Option<String>,
}

/// Container formats recognized by their magic header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
    Ogg,
    Flac,
    Unknown,
}

impl AudioFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Ogg => "audio/ogg",
            Self::Flac => "audio/flac",
            Self::Unknown => "application/octet-stream",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Ogg => "ogg",
            Self::Flac => "flac",
            Self::Unknown => "bin",
        }
    }

    pub fn sniff(data: &[u8]) -> Self {
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WAVE" {
            Self::Wav
        } else if data.starts_with(b"OggS") {
            Self::Ogg
        } else if data.starts_with(b"fLaC") {
            Self::Flac
        } else if data.starts_with(b"ID3")
            || (data.len() >= 2 && data[0] == 0xFF && (data[1] & 0xE0) == 0xE0)
        {
            Self::Mp3
        } else {
            Self::Unknown
        }
    }
}

impl AudioPayload {
    pub fn new(data: impl Into<Bytes>, content_type: Option<String>) -> Self {
        Self {
            data: data.into(),
            content_type,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Bytes {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `Content-Type` reported by the service, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn format(&self) -> AudioFormat {
        AudioFormat::sniff(&self.data)
    }

    /// Service-reported content type, or the sniffed format's MIME type.
    pub fn mime_type(&self) -> &str {
        self.content_type()
            .unwrap_or_else(|| self.format().mime_type())
    }
}
