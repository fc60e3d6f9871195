/// Convenience result type used across bioframe.
pub type BioframeResult<T> = Result<T, BioframeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Rendering paths never surface these: they degrade to defaults instead. Errors only come out
/// of boundary operations such as decoding settings, loading configuration or write-time
/// validation.
#[derive(thiserror::Error, Debug)]
pub enum BioframeError {
    /// Invalid user-provided settings or link data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid engine configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BioframeError {
    /// Build a [`BioframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BioframeError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`BioframeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for BioframeError {
    fn from(value: serde_json::Error) -> Self {
        Self::serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
