/// Convenience result type used across the deinterlacer.
pub type DeinterlaceResult<T> = Result<T, DeinterlaceError>;

/// Top-level error taxonomy used by the registry, engine and stage APIs.
///
/// A cadence that does not match and a field dropped by telecine recovery are normal outcomes
/// and are reported as values, never through this type.
#[derive(thiserror::Error, Debug)]
pub enum DeinterlaceError {
    /// No usable deinterlacing method (empty registry after filtering, unknown name, or no
    /// method selected when reconstruction needs one).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Buffers or frame dimensions do not match the request, or changed mid-stream.
    #[error("geometry mismatch: {0}")]
    GeometryMismatch(String),

    /// Invalid user-provided options.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing options.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DeinterlaceError {
    /// Build a [`DeinterlaceError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`DeinterlaceError::GeometryMismatch`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::GeometryMismatch(msg.into())
    }

    /// Build a [`DeinterlaceError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DeinterlaceError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
