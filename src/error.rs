//! Error handling for wavpull
//!
//! Only opening (and seeking) a decoder can fail. End of stream is never an
//! error: reads signal it with a short count.

use thiserror::Error;

/// Result type alias for reader operations
pub type Result<T> = std::result::Result<T, ReaderError>;

/// Main error type for reader operations
#[derive(Error, Debug)]
pub enum ReaderError {
    // File Errors
    #[error("WAV file not found: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Invalid WAV stream: {reason}")]
    InvalidAudio {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported WAV sample layout: {format}")]
    UnsupportedFormat { format: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReaderError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ReaderError::FileNotFound { .. } => "FILE_NOT_FOUND",
            ReaderError::InvalidAudio { .. } => "INVALID_AUDIO",
            ReaderError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            ReaderError::Io(_) => "IO_ERROR",
        }
    }
}

impl From<hound::Error> for ReaderError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => ReaderError::Io(e),
            hound::Error::TooWide => ReaderError::UnsupportedFormat {
                format: "sample width exceeds 32 bits".to_string(),
            },
            hound::Error::Unsupported => ReaderError::UnsupportedFormat {
                format: "WAV sub-format not supported by decoder".to_string(),
            },
            other => ReaderError::InvalidAudio {
                reason: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }
}
