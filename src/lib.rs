//! nowcard renders "now playing" cards for music tracks.
//!
//! A card is a 1280×720 PNG: the track artwork blurred and darkened as a backdrop, a rounded
//! glass panel with a drop shadow, a rounded cover tile, title and artist text, a progress
//! bar with time labels, an optional control icon strip and a volume bar.
//!
//! # Pipeline overview
//!
//! 1. **Fetch**: `Track::thumbnail -> FetchedArt` (bounded timeout, flat placeholder on failure)
//! 2. **Compose**: `FetchedArt + Track + StyleProfile -> Surface` (fixed z-order of layers)
//! 3. **Persist**: `Surface -> cache/{id}_{variant}.png` (atomic rename)
//!
//! [`CardRenderer::generate`] wraps all three and never fails: on any error it returns the
//! configured default thumbnail path.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Premultiplied RGBA8** end-to-end inside the compositor.
//! - **No global state**: fonts are resolved once and shared through `Arc<FontSet>`.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod foundation;
mod model;
mod persist;
mod render;
mod style;

pub use assets::decode::{decode_image, fit};
pub use assets::fetch::{
    ArtSource, ArtworkFetcher, DEFAULT_FETCH_TIMEOUT, FetchedArt, MAX_ARTWORK_BYTES,
};
pub use assets::fonts::{DEFAULT_FONT_SIZE_PX, FontData, FontPaths, FontRole, FontSet};
pub use config::RenderConfig;
pub use foundation::core::{CANVAS_HEIGHT, CANVAS_WIDTH, Offset, Size, premul_rgba8};
pub use foundation::error::{CardError, CardResult};
pub use model::track::{Track, UNKNOWN_ARTIST, UNKNOWN_DURATION, UNKNOWN_TITLE, truncate_chars};
pub use persist::cache::{CardCache, sanitize_component};
pub use render::blur::gaussian_blur_in_place;
pub use render::composite::{PremulRgba8, composite_over_at, fill_rect, fill_rounded_rect, over};
pub use render::compositor::compose_card;
pub use render::mask::RoundedMask;
pub use render::pipeline::CardRenderer;
pub use render::surface::Surface;
pub use render::text::{TextLayoutEngine, TextSprite};
pub use style::profile::{
    BOLD, BackgroundStyle, BarFill, BarStyle, CoverStyle, IconStyle, PanelStyle, ProfileTable,
    ProgressLabels, SOFT, ShadowStyle, StyleProfile, TextStyle,
};
