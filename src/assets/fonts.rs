use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{debug, warn};

use crate::{
    foundation::error::{CardError, CardResult},
    style::profile::TextStyle,
};

/// Size used for every role when the built-in font is in effect.
pub const DEFAULT_FONT_SIZE_PX: f32 = 11.0;

/// Families tried, in order, when picking the built-in face from the system database.
const BUILTIN_FAMILIES: &[&str] = &["DejaVu Sans", "Liberation Sans", "Noto Sans", "Arial"];

/// Raw font bytes plus the face index inside a collection.
#[derive(Clone)]
pub struct FontData {
    bytes: Arc<Vec<u8>>,
    index: u32,
}

impl FontData {
    /// Wrap font file bytes; `index` selects the face inside a collection.
    pub fn new(bytes: Vec<u8>, index: u32) -> Self {
        Self {
            bytes: Arc::new(bytes),
            index,
        }
    }

    /// The font file bytes.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Shared handle to the font file bytes.
    pub fn shared_bytes(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.bytes)
    }

    /// Face index inside the font file.
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontData")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .finish()
    }
}

/// Text slot on the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontRole {
    /// Track title, drawn with the display font.
    Title,
    /// Channel name, drawn with the body font.
    Artist,
    /// Elapsed and duration labels, drawn with the body font.
    Small,
}

/// Locations of the two custom font files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontPaths {
    /// Bold display face, used for the title.
    pub title: PathBuf,
    /// Light body face, used for the artist line and small labels.
    pub body: PathBuf,
}

/// Fonts for every text role of a card.
///
/// Either all roles use the custom files, or all roles share one built-in face. A partial mix
/// never occurs.
#[derive(Clone, Debug)]
pub enum FontSet {
    /// Configured display and body fonts, sized by the style profile.
    Custom {
        /// Display face for the title.
        title: FontData,
        /// Body face for the artist line and labels.
        body: FontData,
    },
    /// One system face for every role at [`DEFAULT_FONT_SIZE_PX`].
    Builtin(FontData),
    /// No usable face could be found; text layers are skipped.
    Unavailable,
}

impl FontSet {
    /// Load the custom fonts, degrading the whole set to the built-in face on any failure.
    pub fn resolve(paths: &FontPaths) -> Self {
        match Self::load_custom(paths) {
            Ok(set) => {
                debug!(
                    title = %paths.title.display(),
                    body = %paths.body.display(),
                    "loaded custom fonts"
                );
                set
            }
            Err(err) => {
                warn!(error = %err, "custom fonts unavailable, using built-in font");
                Self::builtin()
            }
        }
    }

    /// Build a custom set from in-memory font files.
    pub fn from_font_bytes(title: Vec<u8>, body: Vec<u8>) -> CardResult<Self> {
        Ok(Self::Custom {
            title: validate_font(title, "title font")?,
            body: validate_font(body, "body font")?,
        })
    }

    /// Pick a face from the system font database.
    pub fn builtin() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();

        let mut families: Vec<usvg::fontdb::Family<'_>> = BUILTIN_FAMILIES
            .iter()
            .copied()
            .map(usvg::fontdb::Family::Name)
            .collect();
        families.push(usvg::fontdb::Family::SansSerif);
        let query = usvg::fontdb::Query {
            families: &families,
            ..Default::default()
        };

        let Some(id) = db.query(&query).or_else(|| db.faces().next().map(|f| f.id)) else {
            warn!("no system fonts found, text layers will be skipped");
            return Self::Unavailable;
        };

        match db.with_face_data(id, |data, index| FontData::new(data.to_vec(), index)) {
            Some(font) => Self::Builtin(font),
            None => {
                warn!("system font data could not be read, text layers will be skipped");
                Self::Unavailable
            }
        }
    }

    fn load_custom(paths: &FontPaths) -> CardResult<Self> {
        let title = load_font_file(&paths.title)?;
        let body = load_font_file(&paths.body)?;
        Ok(Self::Custom { title, body })
    }

    /// Face for `role`, or `None` when no font is available.
    pub fn face(&self, role: FontRole) -> Option<&FontData> {
        match self {
            Self::Custom { title, body } => Some(match role {
                FontRole::Title => title,
                FontRole::Artist | FontRole::Small => body,
            }),
            Self::Builtin(font) => Some(font),
            Self::Unavailable => None,
        }
    }

    /// Pixel size for `role`: profile-driven for custom fonts, fixed otherwise.
    pub fn size_px(&self, role: FontRole, text: &TextStyle) -> f32 {
        match self {
            Self::Custom { .. } => match role {
                FontRole::Title => text.title_size_px,
                FontRole::Artist => text.artist_size_px,
                FontRole::Small => text.small_size_px,
            },
            Self::Builtin(_) | Self::Unavailable => DEFAULT_FONT_SIZE_PX,
        }
    }

    /// Whether the configured font files are in use.
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom { .. })
    }

    /// Short name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Custom { .. } => "custom",
            Self::Builtin(_) => "builtin",
            Self::Unavailable => "unavailable",
        }
    }
}

fn load_font_file(path: &Path) -> CardResult<FontData> {
    let bytes = std::fs::read(path).map_err(|e| {
        CardError::asset_missing(format!("read font '{}': {e}", path.display()))
    })?;
    validate_font(bytes, &path.display().to_string())
}

fn validate_font(bytes: Vec<u8>, label: &str) -> CardResult<FontData> {
    let mut db = usvg::fontdb::Database::new();
    db.load_font_data(bytes.clone());
    if db.faces().next().is_none() {
        return Err(CardError::decode(format!("{label}: no font faces found")));
    }
    Ok(FontData::new(bytes, 0))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
