use serde::{Deserialize, Serialize};

/// Shown in place of an empty title.
pub const UNKNOWN_TITLE: &str = "Unknown Title";
/// Shown in place of an empty channel name.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
/// Shown in place of a missing duration.
pub const UNKNOWN_DURATION: &str = "--:--";

/// Track metadata as produced by the lookup layer. Read-only for the renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    /// Stable identifier, used as the cache key.
    pub id: String,
    /// May be empty; drawn as [`UNKNOWN_TITLE`] then.
    pub title: String,
    /// May be empty; drawn as [`UNKNOWN_ARTIST`] then.
    pub channel_name: String,
    /// Human-readable `m:ss` duration, if known.
    pub duration: Option<String>,
    /// Artwork URL.
    pub thumbnail: String,
    /// Whether the track is a video stream. Not used for rendering.
    pub video: bool,
}

impl Track {
    /// Track with only an id and artwork URL set.
    pub fn new(id: impl Into<String>, thumbnail: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            thumbnail: thumbnail.into(),
            ..Self::default()
        }
    }

    /// Builder setter for [`Track::title`].
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder setter for [`Track::channel_name`].
    pub fn with_channel(mut self, channel_name: impl Into<String>) -> Self {
        self.channel_name = channel_name.into();
        self
    }

    /// Builder setter for [`Track::duration`].
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Title as drawn: defaulted when empty and cut to `max_chars` characters.
    pub fn display_title(&self, max_chars: usize) -> String {
        truncate_chars(non_empty_or(&self.title, UNKNOWN_TITLE), max_chars)
    }

    /// Channel name as drawn: defaulted when empty and cut to `max_chars` characters.
    pub fn display_artist(&self, max_chars: usize) -> String {
        truncate_chars(non_empty_or(&self.channel_name, UNKNOWN_ARTIST), max_chars)
    }

    /// Duration as drawn, or [`UNKNOWN_DURATION`] when missing or blank.
    pub fn display_duration(&self) -> &str {
        match self.duration.as_deref() {
            Some(d) if !d.trim().is_empty() => d,
            _ => UNKNOWN_DURATION,
        }
    }
}

fn non_empty_or<'a>(s: &'a str, fallback: &'a str) -> &'a str {
    if s.is_empty() { fallback } else { s }
}

/// Keep at most `max_chars` Unicode scalar values.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/track.rs"]
mod tests;
