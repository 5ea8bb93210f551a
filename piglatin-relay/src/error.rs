/// Error types for the relay pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// Inbound event failed validation (missing or empty fields)
    InvalidEvent(String),
    /// Destination channel name is not one of the known channels
    InvalidChannel(String),
    /// Language code is empty or contains invalid characters
    InvalidLocale(String),
    /// Missing or unusable configuration (API key, env var, channel settings)
    ConfigError(String),
    /// HTTP transport failure talking to an external service
    NetworkError(String),
    /// Language detection service failure
    DetectionError(String),
    /// Translation service failure
    TranslationError(String),
    /// Event-bus or queue dispatch failure
    DispatchError(String),
}

impl std::fmt::Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelayError::InvalidEvent(msg) => write!(f, "Invalid event: {}", msg),
            RelayError::InvalidChannel(name) => write!(f, "Unknown destination channel: {}", name),
            RelayError::InvalidLocale(msg) => write!(f, "Invalid locale: {}", msg),
            RelayError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            RelayError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            RelayError::DetectionError(msg) => write!(f, "Language detection error: {}", msg),
            RelayError::TranslationError(msg) => write!(f, "Translation error: {}", msg),
            RelayError::DispatchError(msg) => write!(f, "Dispatch error: {}", msg),
        }
    }
}

impl std::error::Error for RelayError {}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::NetworkError(err.to_string())
    }
}

/// Result type for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
