//! OMDb client error types.

/// Failure kinds for a title lookup.
///
/// A lookup that finds nothing is not an error; see [`super::MovieRecord::is_found`].
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum OmdbError {
    /// The request could not be sent or the response body could not be read.
    Transport {
        /// Request URL.
        url: String,
        /// Underlying HTTP error.
        source: reqwest::Error,
    },
    /// The response body is not a JSON movie record.
    Decode {
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

impl std::fmt::Display for OmdbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport { url, .. } => write!(f, "OMDb request failed: {url}"),
            Self::Decode { .. } => write!(f, "failed to decode OMDb JSON response"),
        }
    }
}

impl std::error::Error for OmdbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source),
            Self::Decode { source } => Some(source),
        }
    }
}

impl OmdbError {
    /// Returns `true` for transport failures.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns `true` for decoding failures.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
