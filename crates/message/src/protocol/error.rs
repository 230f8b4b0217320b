use std::io;
use thiserror::Error;

/// Errors reported to the caller of the message model.
///
/// Parsing never fails: malformed first lines and header lines without a colon degrade to
/// partial output. Only misuse of the entity (reserved keys, bad options, a missing URI)
/// ends up here.
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("header key `{key}` is reserved for parsed metadata")]
    ReservedKey { key: String },

    #[error("missing uri, message can't be serialized")]
    MissingUri,

    #[error("invalid options: {source}")]
    InvalidOptions {
        #[from]
        source: serde_json::Error,
    },

    #[error("form encoding error: {source}")]
    Encode {
        #[from]
        source: serde_urlencoded::ser::Error,
    },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl MessageError {
    pub fn invalid_argument<S: ToString>(str: S) -> Self {
        Self::InvalidArgument { reason: str.to_string() }
    }

    pub fn reserved_key<S: ToString>(key: S) -> Self {
        Self::ReservedKey { key: key.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    /// Returns true for the caller-misuse class: bad arguments, reserved keys, unknown options
    /// and a missing uri.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            MessageError::InvalidArgument { .. }
                | MessageError::ReservedKey { .. }
                | MessageError::MissingUri
                | MessageError::InvalidOptions { .. }
        )
    }
}
