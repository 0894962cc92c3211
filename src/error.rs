//! Error handling for DreamWeaver
//!
//! Remote failures never end a session: they are reported through the
//! error banner and the user retries by re-issuing the action.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for DreamWeaver operations
pub type Result<T> = std::result::Result<T, DreamError>;

/// Failure of a single call to a remote AI service
#[derive(Error, Debug)]
pub enum RemoteCallError {
    #[error("No API credential configured")]
    MissingCredential,

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {reason}")]
    MalformedResponse { reason: String },
}

impl RemoteCallError {
    /// True when the service rejected the credential (or none was sent)
    pub fn is_credential_problem(&self) -> bool {
        match self {
            RemoteCallError::MissingCredential => true,
            RemoteCallError::Status { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for RemoteCallError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            RemoteCallError::Status {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else if err.is_decode() {
            RemoteCallError::MalformedResponse {
                reason: err.to_string(),
            }
        } else {
            RemoteCallError::Network {
                message: err.to_string(),
            }
        }
    }
}

/// Main error type for DreamWeaver operations
#[derive(Error, Debug)]
pub enum DreamError {
    #[error("Please enter a dream description first.")]
    MissingInput,

    #[error("Remote call failed: {0}")]
    Remote(#[from] RemoteCallError),

    // Store Errors
    #[error("Failed to read store: {path}: {source}")]
    StoreRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write store: {path}: {source}")]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory creation failed: {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DreamError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            DreamError::MissingInput => "MISSING_INPUT",
            DreamError::Remote(_) => "REMOTE_CALL_ERROR",
            DreamError::StoreRead { .. } => "STORE_READ",
            DreamError::StoreWrite { .. } => "STORE_WRITE",
            DreamError::DirectoryCreate { .. } => "DIRECTORY_CREATE",
            DreamError::Config { .. } => "CONFIG_ERROR",
            DreamError::Io(_) => "IO_ERROR",
            DreamError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if the user can recover by retrying or editing input
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DreamError::MissingInput | DreamError::Remote(_))
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            DreamError::MissingInput => vec!["Describe your dream in the Record panel first"],
            DreamError::Remote(err) if err.is_credential_problem() => vec![
                "Set DREAMWEAVER_API_KEY or OPENAI_API_KEY",
                "Check the key has not been revoked",
            ],
            DreamError::Remote(_) => vec![
                "Check your network connection",
                "Try the action again",
            ],
            DreamError::StoreWrite { .. } | DreamError::DirectoryCreate { .. } => vec![
                "Check the store location is writable",
                "Point DREAMWEAVER_STORE at a different file",
            ],
            DreamError::StoreRead { .. } | DreamError::Serialization(_) => {
                vec!["The store file may be corrupted - move it aside to start fresh"]
            }
            _ => vec![],
        }
    }
}
