/// Convenience result type used across nowcard.
pub type CardResult<T> = Result<T, CardError>;

/// Error taxonomy used by the render pipeline.
///
/// Each kind maps to one recovery policy: fetch and decode errors fall back to a placeholder
/// image, asset errors fall back to built-in substitutes or a skipped layer, and the rest are
/// caught by the renderer and answered with the default thumbnail.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Invalid caller-provided data (unknown profile, empty track id, bad config).
    #[error("validation error: {0}")]
    Validation(String),

    /// The artwork request did not complete within the configured bound.
    #[error("fetch timeout: {0}")]
    FetchTimeout(String),

    /// Transport failure or non-success HTTP status while fetching artwork.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Bytes could not be decoded into an image.
    #[error("decode error: {0}")]
    Decode(String),

    /// A local asset (font, icon sheet) is missing or unreadable.
    #[error("asset missing: {0}")]
    AssetMissing(String),

    /// Unexpected failure while building or compositing a layer.
    #[error("render error: {0}")]
    Render(String),

    /// Filesystem failure while persisting output.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardError::FetchTimeout`] value.
    pub fn fetch_timeout(msg: impl Into<String>) -> Self {
        Self::FetchTimeout(msg.into())
    }

    /// Build a [`CardError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`CardError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`CardError::AssetMissing`] value.
    pub fn asset_missing(msg: impl Into<String>) -> Self {
        Self::AssetMissing(msg.into())
    }

    /// Build a [`CardError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
