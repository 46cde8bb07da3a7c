use std::time::Duration;

use image::{Rgba, RgbaImage};
use tracing::{debug, warn};

use crate::assets::decode::{decode_image, fit};
use crate::foundation::{
    core::Size,
    error::{CardError, CardResult},
};

/// Default bound on one artwork request, connect through last body byte.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(6);
/// Largest artwork body accepted before decoding.
pub const MAX_ARTWORK_BYTES: u64 = 16 * 1024 * 1024;

/// Where the background/cover pixels of a card came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArtSource {
    /// Downloaded and decoded successfully.
    Remote,
    /// Flat profile colour, used after any fetch or decode failure.
    Placeholder {
        /// Display form of the error that caused the fallback.
        reason: String,
    },
}

/// Artwork already fit to the canvas.
#[derive(Clone, Debug)]
pub struct FetchedArt {
    /// Straight-alpha pixels at the fetcher's target size.
    pub image: RgbaImage,
    /// Origin of `image`.
    pub source: ArtSource,
}

impl FetchedArt {
    /// Whether the placeholder was used.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.source, ArtSource::Placeholder { .. })
    }
}

/// Downloads artwork with a bounded timeout and never fails outward.
#[derive(Clone, Debug)]
pub struct ArtworkFetcher {
    client: reqwest::Client,
    timeout: Duration,
    target: Size,
}

impl ArtworkFetcher {
    /// Build a fetcher whose requests are bounded by `timeout`. Zero is rejected.
    pub fn new(timeout: Duration) -> CardResult<Self> {
        if timeout.is_zero() {
            return Err(CardError::validation("fetch timeout must be > 0"));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CardError::fetch(format!("build http client: {e}")))?;
        Ok(Self {
            client,
            timeout,
            target: Size::canvas(),
        })
    }

    /// Total per-request bound.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Size every fetched image is fit to.
    pub fn target(&self) -> Size {
        self.target
    }

    /// Fetch `url` and fit it to the canvas; any failure yields a flat `placeholder` image.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, url: &str, placeholder: [u8; 4]) -> FetchedArt {
        if url.trim().is_empty() {
            debug!("empty artwork url, using placeholder");
            return self.placeholder(placeholder, "empty url".to_owned());
        }
        match self.try_fetch(url).await {
            Ok(image) => FetchedArt {
                image,
                source: ArtSource::Remote,
            },
            Err(err) => {
                warn!(error = %err, "artwork fetch failed, using placeholder");
                self.placeholder(placeholder, err.to_string())
            }
        }
    }

    /// Fetch, decode and fit `url`, reporting the first failure.
    ///
    /// Non-success statuses and bodies over [`MAX_ARTWORK_BYTES`] are `Fetch` errors,
    /// undecodable bodies are `Decode` errors and an expired deadline is `FetchTimeout`.
    pub async fn try_fetch(&self, url: &str) -> CardResult<RgbaImage> {
        let mut response = self.client.get(url).send().await.map_err(map_reqwest)?;
        let status = response.status();
        if !status.is_success() {
            return Err(CardError::fetch(format!("GET {url} returned {status}")));
        }
        if let Some(len) = response.content_length()
            && len > MAX_ARTWORK_BYTES
        {
            return Err(too_large(len));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(map_reqwest)? {
            let len = (bytes.len() + chunk.len()) as u64;
            if len > MAX_ARTWORK_BYTES {
                return Err(too_large(len));
            }
            bytes.extend_from_slice(&chunk);
        }
        debug!(len = bytes.len(), "artwork downloaded");

        let decoded = decode_image(&bytes)?;
        Ok(fit(&decoded, self.target))
    }

    fn placeholder(&self, rgba: [u8; 4], reason: String) -> FetchedArt {
        FetchedArt {
            image: RgbaImage::from_pixel(self.target.width, self.target.height, Rgba(rgba)),
            source: ArtSource::Placeholder { reason },
        }
    }
}

fn too_large(len: u64) -> CardError {
    CardError::fetch(format!(
        "artwork body of {len} bytes exceeds {MAX_ARTWORK_BYTES}"
    ))
}

fn map_reqwest(err: reqwest::Error) -> CardError {
    if err.is_timeout() {
        CardError::fetch_timeout(err.to_string())
    } else if err.is_decode() {
        CardError::decode(err.to_string())
    } else {
        CardError::fetch(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
