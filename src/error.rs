use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field or parameter that caused the error (e.g., "request.text", "speaker")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the offending value)
    pub details: Option<String>,
    /// Source of the error (e.g., "list_voices", "request_validator")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the synthesis client.
///
/// The three variants callers are expected to branch on are
/// [`Error::ServiceUnavailable`], [`Error::Service`] and [`Error::InvalidInput`].
#[derive(Debug, Error)]
pub enum Error {
    /// The speech service could not be reached (not running, wrong port, refused).
    #[error("Speech service unavailable: {message}{}", format_context(.context))]
    ServiceUnavailable {
        message: String,
        context: ErrorContext,
    },

    /// The service was reached but answered with a non-success status.
    #[error("Speech service error: HTTP {status}: {message}")]
    Service { status: u16, message: String },

    /// A caller-side precondition was violated before any request was sent.
    #[error("Invalid input: {message}{}", format_context(.context))]
    InvalidInput {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::unavailable_with_context(msg, ErrorContext::new())
    }

    pub fn unavailable_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::ServiceUnavailable {
            message: msg.into(),
            context,
        }
    }

    pub fn service(status: u16, msg: impl Into<String>) -> Self {
        Error::Service {
            status,
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::invalid_input_with_context(msg, ErrorContext::new())
    }

    pub fn invalid_input_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::InvalidInput {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::ServiceUnavailable { context, .. }
            | Error::InvalidInput { context, .. }
            | Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::ServiceUnavailable { .. })
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput { .. })
    }

    /// HTTP status returned by the service, if the error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        match self {
            Error::ServiceUnavailable { .. } => {
                "The speech service is not reachable. Start the speech engine and try again."
                    .to_string()
            }
            Error::InvalidInput { message, .. } => message.clone(),
            other => format!("An error occurred: {}", other),
        }
    }
}
