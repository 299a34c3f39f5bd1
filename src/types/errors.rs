use std::fmt;

// === CollectError ===

/// Errors raised while querying the host for its installed fonts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectError {
    /// The host exposes no font-enumeration capability.
    UnsupportedCapability,
    /// The user declined the permission prompt.
    PermissionDenied(String),
    /// The enumeration call itself failed.
    QueryFailed(String),
}

impl fmt::Display for CollectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectError::UnsupportedCapability => {
                write!(f, "This platform does not support querying local fonts.")
            }
            CollectError::PermissionDenied(msg) => write!(
                f,
                "Permission to query local fonts was denied. Make sure you've granted the necessary permissions. ({})",
                msg
            ),
            CollectError::QueryFailed(msg) => {
                write!(f, "An error occurred while querying local fonts: {}", msg)
            }
        }
    }
}

impl std::error::Error for CollectError {}

// === GatewayError ===

/// Errors raised by the submission gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The repository API answered with a non-success status.
    /// Displays as the upstream message, verbatim.
    Upstream { status: u16, message: String },
    /// The request could not be completed.
    Transport(String),
}

impl GatewayError {
    /// The upstream-provided text, or the transport failure description.
    pub fn message(&self) -> &str {
        match self {
            GatewayError::Upstream { message, .. } => message,
            GatewayError::Transport(msg) => msg,
        }
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Upstream { message, .. } => write!(f, "{}", message),
            GatewayError::Transport(msg) => write!(f, "Submission transport error: {}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

// === ReviewError ===

/// Errors returned by reviewer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    /// The operation is not valid in the current phase.
    InvalidState { operation: &'static str, phase: &'static str },
    /// No entry exists at the given index.
    IndexOutOfRange { index: usize, len: usize },
    /// A submission is already outstanding.
    SubmissionInFlight,
    /// A submission has already succeeded; reset to start over.
    AlreadySubmitted,
    /// Collection failed; the reviewer recorded the message.
    Collect(CollectError),
    /// Submission failed; the reviewer recorded the message.
    Gateway(GatewayError),
}

impl fmt::Display for ReviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewError::InvalidState { operation, phase } => {
                write!(f, "Cannot {} while {}", operation, phase)
            }
            ReviewError::IndexOutOfRange { index, len } => {
                write!(f, "Font index {} out of range (list has {} entries)", index, len)
            }
            ReviewError::SubmissionInFlight => write!(f, "A submission is already in progress"),
            ReviewError::AlreadySubmitted => write!(f, "Fonts have already been submitted"),
            ReviewError::Collect(e) => write!(f, "{}", e),
            ReviewError::Gateway(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ReviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReviewError::Collect(e) => Some(e),
            ReviewError::Gateway(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CollectError> for ReviewError {
    fn from(e: CollectError) -> Self {
        ReviewError::Collect(e)
    }
}

impl From<GatewayError> for ReviewError {
    fn from(e: GatewayError) -> Self {
        ReviewError::Gateway(e)
    }
}

// === ConfigError ===

/// Errors related to loading settings and secrets.
#[derive(Debug)]
pub enum ConfigError {
    /// The named environment variable holding the credential is unset or empty.
    MissingCredential(String),
    /// The named environment variable holds a token that is not a valid header value.
    InvalidCredential(String),
    /// File system error reading or writing settings.
    IoError(String),
    /// Settings file could not be parsed or written.
    SerializationError(String),
    /// The HTTP client could not be constructed.
    HttpClient(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingCredential(var) => {
                write!(f, "Missing credential: set the {} environment variable", var)
            }
            ConfigError::InvalidCredential(var) => write!(
                f,
                "Invalid credential: the {} environment variable contains characters not allowed in a header",
                var
            ),
            ConfigError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            ConfigError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            ConfigError::HttpClient(msg) => write!(f, "HTTP client error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
