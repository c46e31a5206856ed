pub type PersonaeResult<T> = Result<T, PersonaeError>;

#[derive(thiserror::Error, Debug)]
pub enum PersonaeError {
    /// An avatar was constructed from something that is neither a video element nor a
    /// live media stream.
    #[error("invalid avatar source: expected a video element or a live media stream")]
    InvalidSourceKind,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("media error: {0}")]
    Media(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PersonaeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
