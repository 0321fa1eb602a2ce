//! Error kinds shared across the crate

/// Crate-wide error, classified by how the caller should react
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Resource not reachable yet (client loading, socket dropped); retry later
    #[error("{0}")]
    Transient(String),

    /// Unrecoverable; the process reports the message and exits
    #[error("{message}")]
    Fatal {
        message: String,
        guidance: Option<String>,
    },

    /// Unexpected but harmless input; log it and carry on
    #[error("{0}")]
    Ignorable(String),
}

impl Error {
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::Fatal {
            message: message.into(),
            guidance: None,
        }
    }

    pub fn fatal_with_guidance(message: impl Into<String>, guidance: impl Into<String>) -> Self {
        Self::Fatal {
            message: message.into(),
            guidance: Some(guidance.into()),
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal { .. })
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }

    pub fn guidance(&self) -> Option<&str> {
        match self {
            Self::Fatal { guidance, .. } => guidance.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Transient(format!("HTTP request failed: {}", e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Ignorable(format!("Unexpected payload: {}", e))
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Transient(format!("WebSocket error: {}", e))
    }
}

impl From<ConnectError> for Error {
    fn from(e: ConnectError) -> Self {
        let guidance = e.guidance();
        Self::fatal_with_guidance(e.to_string(), guidance)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure to hand a view to the presence display
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PushError {
    #[error("presence connection is closed")]
    Disconnected,
    #[error("presence update rejected: {0}")]
    Rejected(String),
}

/// Failure to open the presence IPC connection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectError {
    #[error("invalid Discord client id: {0}")]
    InvalidClientId(String),
    #[error("Discord IPC socket not found: {0}")]
    NotFound(String),
    #[error("Discord closed the IPC pipe")]
    PipeClosed,
    #[error("Discord IPC error: {0}")]
    Ipc(String),
}

impl ConnectError {
    /// Worth retrying after a short wait (Discord still starting up)
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::PipeClosed | Self::Ipc(_))
    }

    pub fn guidance(&self) -> &'static str {
        match self {
            Self::InvalidClientId(_) => {
                "Make sure your Discord Application ID is correct (--client-id)."
            }
            Self::NotFound(_) => {
                "Make sure Discord is installed and running on your system."
            }
            Self::PipeClosed => "Discord seems to be closed. Start Discord and try again.",
            Self::Ipc(_) => {
                "Try to restart Discord (close the application fully, then start it again)."
            }
        }
    }
}
