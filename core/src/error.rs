use thiserror::Error;

pub const CONNECTION_FAILURE_MESSAGE: &str =
    "Failed to connect to the server or invalid address format.";
pub const DECODE_FAILURE_MESSAGE: &str = "Server returned invalid JSON response";
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Everything that can end a wallet query. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExploreError {
    /// Transport-level failure: DNS, refused connection, timeout, bad request.
    #[error("{}", CONNECTION_FAILURE_MESSAGE)]
    ConnectionFailure,

    /// The response body was not valid JSON, whatever the HTTP status.
    #[error("{}", DECODE_FAILURE_MESSAGE)]
    DecodeFailure,

    /// Well-formed body with a non-success status.
    #[error("{0}")]
    Application(String),
}

impl ExploreError {
    /// Application failure built from an optional server message.
    /// Empty messages fall back to the generic text.
    pub fn application(message: Option<&str>) -> Self {
        match message {
            Some(m) if !m.is_empty() => Self::Application(m.to_string()),
            _ => Self::Application(UNKNOWN_ERROR_MESSAGE.to_string()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConnectionFailure => "connection",
            Self::DecodeFailure => "decode",
            Self::Application(_) => "application",
        }
    }
}
