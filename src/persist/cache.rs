use std::{
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder};
use tracing::debug;

use crate::{
    foundation::error::{CardError, CardResult},
    render::surface::Surface,
};

/// Directory of rendered cards, one PNG per `(track id, variant)`.
#[derive(Clone, Debug)]
pub struct CardCache {
    dir: PathBuf,
}

impl CardCache {
    /// Cache rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of the cache.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Deterministic output path for `(track_id, variant)`; nothing is written.
    pub fn path_for(&self, track_id: &str, variant: &str) -> CardResult<PathBuf> {
        let id = sanitize_component(track_id);
        if id.is_empty() {
            return Err(CardError::validation("track id must be non-empty"));
        }
        let variant = sanitize_component(variant);
        if variant.is_empty() {
            return Err(CardError::validation("variant must be non-empty"));
        }
        Ok(self.dir.join(format!("{id}_{variant}.png")))
    }

    /// Encode `surface` as PNG and atomically replace the cached file.
    ///
    /// The bytes go to a temp file in the cache directory which is then renamed over the
    /// destination, so readers see either the old file or the new one.
    pub fn save(&self, surface: &Surface, track_id: &str, variant: &str) -> CardResult<PathBuf> {
        let path = self.path_for(track_id, variant)?;
        std::fs::create_dir_all(&self.dir)?;

        let rgba = surface.to_rgba_image()?;
        let tmp = tempfile::Builder::new()
            .prefix(".card-")
            .suffix(".png.tmp")
            .tempfile_in(&self.dir)?;
        {
            let mut w = BufWriter::new(tmp.as_file());
            PngEncoder::new(&mut w)
                .write_image(
                    rgba.as_raw(),
                    rgba.width(),
                    rgba.height(),
                    ExtendedColorType::Rgba8,
                )
                .map_err(|e| CardError::render(format!("encode png: {e}")))?;
            w.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| CardError::Io(e.error))?;

        debug!(path = %path.display(), "card written");
        Ok(path)
    }
}

/// Replace every character outside `[A-Za-z0-9_.-]` with `_`.
pub fn sanitize_component(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/persist/cache.rs"]
mod tests;
