use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    assets::fonts::FontPaths,
    foundation::error::{CardError, CardResult},
    style::profile::{ProfileTable, StyleProfile},
};

/// Renderer settings, loadable from JSON. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Directory receiving `{id}_{variant}.png`.
    pub cache_dir: PathBuf,
    /// Returned by the renderer whenever a card cannot be produced.
    pub default_thumb: PathBuf,
    /// Face for the title line.
    pub title_font: PathBuf,
    /// Face for the artist, duration and elapsed labels.
    pub body_font: PathBuf,
    /// Playback-controls sprite sheet. The icon layer is skipped when unset.
    pub icon_sheet: Option<PathBuf>,
    /// Total budget for one artwork request.
    pub fetch_timeout_ms: u64,
    /// Extra or overriding skins, merged over `bold` and `soft`.
    pub profiles: Vec<StyleProfile>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("cache"),
            default_thumb: PathBuf::from("assets/default_thumb.png"),
            title_font: PathBuf::from("assets/fonts/Raleway-Bold.ttf"),
            body_font: PathBuf::from("assets/fonts/Inter-Light.ttf"),
            icon_sheet: Some(PathBuf::from("assets/controls.png")),
            fetch_timeout_ms: 6000,
            profiles: Vec::new(),
        }
    }
}

impl RenderConfig {
    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> CardResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .with_context(|| format!("parse config '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject a zero timeout, an empty cache dir, or any invalid profile.
    pub fn validate(&self) -> CardResult<()> {
        if self.fetch_timeout_ms == 0 {
            return Err(CardError::validation("fetch_timeout_ms must be > 0"));
        }
        if self.cache_dir.as_os_str().is_empty() {
            return Err(CardError::validation("cache_dir must be non-empty"));
        }
        for profile in &self.profiles {
            profile.validate()?;
        }
        Ok(())
    }

    /// `fetch_timeout_ms` as a [`Duration`].
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// The title and body font locations.
    pub fn font_paths(&self) -> FontPaths {
        FontPaths {
            title: self.title_font.clone(),
            body: self.body_font.clone(),
        }
    }

    /// Built-in skins with every configured profile inserted on top.
    pub fn profile_table(&self) -> CardResult<ProfileTable> {
        let mut table = ProfileTable::builtin();
        for profile in &self.profiles {
            table.insert(profile.clone())?;
        }
        Ok(table)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
