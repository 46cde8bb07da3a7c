use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{debug, info, warn};

use crate::{
    assets::{fetch::ArtworkFetcher, fonts::FontSet},
    config::RenderConfig,
    foundation::error::{CardError, CardResult},
    model::track::Track,
    persist::cache::CardCache,
    render::compositor::compose_card,
    style::profile::ProfileTable,
};

/// Fetch, compose and persist cards. Cheap to share across tasks.
#[derive(Clone, Debug)]
pub struct CardRenderer {
    config: RenderConfig,
    fonts: Arc<FontSet>,
    fetcher: ArtworkFetcher,
    cache: CardCache,
    profiles: Arc<ProfileTable>,
}

impl CardRenderer {
    /// Build a renderer with an already-resolved font set.
    pub fn new(config: RenderConfig, fonts: Arc<FontSet>) -> CardResult<Self> {
        config.validate()?;
        let fetcher = ArtworkFetcher::new(config.fetch_timeout())?;
        let cache = CardCache::new(config.cache_dir.clone());
        let profiles = Arc::new(config.profile_table()?);
        Ok(Self {
            config,
            fonts,
            fetcher,
            cache,
            profiles,
        })
    }

    /// Resolve the configured fonts, then build the renderer.
    pub fn from_config(config: RenderConfig) -> CardResult<Self> {
        let fonts = Arc::new(FontSet::resolve(&config.font_paths()));
        info!(fonts = fonts.kind(), "font set ready");
        Self::new(config, fonts)
    }

    /// The settings this renderer was built with.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Built-in skins merged with the configured ones.
    pub fn profiles(&self) -> &ProfileTable {
        &self.profiles
    }

    /// Output cache.
    pub fn cache(&self) -> &CardCache {
        &self.cache
    }

    /// Path returned whenever a card cannot be produced.
    pub fn default_thumb(&self) -> &Path {
        &self.config.default_thumb
    }

    /// Render the card for `track`; any failure yields the default thumbnail path.
    #[tracing::instrument(skip(self, track), fields(track_id = %track.id))]
    pub async fn generate(&self, track: &Track, profile_name: &str) -> PathBuf {
        match self.try_generate(track, profile_name).await {
            Ok(path) => path,
            Err(err) => {
                warn!(error = %err, "card render failed, using default thumbnail");
                self.config.default_thumb.clone()
            }
        }
    }

    /// Fallible form of [`CardRenderer::generate`].
    pub async fn try_generate(&self, track: &Track, profile_name: &str) -> CardResult<PathBuf> {
        let profile = self
            .profiles
            .get(profile_name)
            .ok_or_else(|| CardError::validation(format!("unknown profile '{profile_name}'")))?;
        // Fail before the network round trip when the id cannot name a file.
        self.cache.path_for(&track.id, &profile.name)?;

        let art = self
            .fetcher
            .fetch(&track.thumbnail, profile.placeholder_rgba)
            .await;
        debug!(placeholder = art.is_placeholder(), "artwork ready");

        let card = compose_card(
            &art.image,
            track,
            profile,
            &self.fonts,
            self.config.icon_sheet.as_deref(),
        )?;
        let path = self.cache.save(&card, &track.id, &profile.name)?;
        info!(path = %path.display(), profile = %profile.name, "card rendered");
        Ok(path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
