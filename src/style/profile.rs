use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::{CANVAS_WIDTH, Offset, Size},
    error::{CardError, CardResult},
};

/// Name of the dark, warm-tinted skin.
pub const BOLD: &str = "bold";
/// Name of the lighter grey skin.
pub const SOFT: &str = "soft";

/// Largest blur sigma a profile may ask for, in pixels.
pub const MAX_BLUR_SIGMA: f32 = 200.0;
/// Largest font size a profile may ask for, in pixels.
pub const MAX_FONT_SIZE_PX: f32 = 400.0;
/// Profile coordinates must lie within this many pixels of the canvas origin.
const COORD_LIMIT: i32 = 4 * CANVAS_WIDTH as i32;

/// How far the bright segment of a bar extends along its track.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BarFill {
    /// Fixed pixel length from the bar start.
    Offset {
        /// Length of the bright segment.
        px: i32,
    },
    /// Fixed fraction of the track length.
    Fraction {
        /// Share of the track, clamped to `[0, 1]`.
        value: f32,
    },
}

/// Blurred artwork backdrop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackgroundStyle {
    /// Gaussian standard deviation in pixels.
    pub blur_sigma: f32,
    /// Brightness multiplier, below 1.0 to darken.
    pub brightness: f32,
    /// Full-canvas tint composited over the darkened artwork.
    pub tint_rgba: [u8; 4],
}

/// Translucent rounded panel holding the card content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelStyle {
    /// Panel extent; the panel is centred on the canvas.
    pub size: Size,
    /// Corner radius in pixels.
    pub radius: f32,
    /// Glass fill colour, straight alpha.
    pub glass_rgba: [u8; 4],
}

/// Panel-sized shadow drawn under the glass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadowStyle {
    /// Shadow colour, straight alpha.
    pub rgba: [u8; 4],
    /// Displacement from the panel origin.
    pub offset: Offset,
    /// Corner radius in pixels.
    pub radius: f32,
    /// Zero draws a hard-edged shadow.
    pub blur_sigma: f32,
}

/// Rounded artwork tile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoverStyle {
    /// Edge length of the square cover tile.
    pub size: u32,
    /// Position relative to the panel origin.
    pub offset: Offset,
    /// Corner radius in pixels.
    pub radius: f32,
}

/// Title, artist and label text. Offsets are relative to the panel origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Top-left of the title line.
    pub title_offset: Offset,
    /// Titles are cut to this many characters.
    pub title_max_chars: usize,
    /// Title colour.
    pub title_rgba: [u8; 4],
    /// Title size with custom fonts.
    pub title_size_px: f32,
    /// Top-left of the artist line.
    pub artist_offset: Offset,
    /// Artist names are cut to this many characters.
    pub artist_max_chars: usize,
    /// Artist colour.
    pub artist_rgba: [u8; 4],
    /// Artist size with custom fonts.
    pub artist_size_px: f32,
    /// Size used for the elapsed/duration labels.
    pub small_size_px: f32,
    /// Colour of the elapsed/duration labels.
    pub label_rgba: [u8; 4],
}

/// Two-segment horizontal bar. Coordinates are relative to the panel origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarStyle {
    /// Left end of the track.
    pub start_x: i32,
    /// Right end of the track.
    pub end_x: i32,
    /// Centre line of the bar.
    pub y: i32,
    /// Bar height in pixels.
    pub thickness: u32,
    /// Colour of the full-length track.
    pub track_rgba: [u8; 4],
    /// Colour of the bright segment.
    pub fill_rgba: [u8; 4],
    /// Length of the bright segment.
    pub fill: BarFill,
}

impl BarStyle {
    /// End of the bright segment, always within `[start_x, end_x]`.
    pub fn fill_end_x(&self) -> i32 {
        let (start, end) = (i64::from(self.start_x), i64::from(self.end_x));
        let raw = match self.fill {
            BarFill::Offset { px } => start + i64::from(px),
            BarFill::Fraction { value } => {
                let f = if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 };
                start + ((end - start) as f64 * f64::from(f)).round() as i64
            }
        };
        // Fits in i32 once clamped between two i32 values.
        raw.clamp(start, end.max(start)) as i32
    }

    /// Track length in pixels; zero when the ends are reversed.
    pub fn track_len(&self) -> u32 {
        let len = i64::from(self.end_x) - i64::from(self.start_x);
        u32::try_from(len.max(0)).unwrap_or(u32::MAX)
    }
}

/// Elapsed and duration labels around the progress bar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressLabels {
    /// Text drawn as the elapsed time; no playback position is tracked.
    pub elapsed_text: String,
    /// Relative to the progress bar start.
    pub elapsed_offset: Offset,
    /// Relative to the progress bar end.
    pub duration_offset: Offset,
}

/// Placement of the control icon sheet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IconStyle {
    /// The icon sheet is resized to exactly this extent.
    pub size: Size,
    /// Relative to the panel origin.
    pub offset: Offset,
}

/// Every constant the compositor reads for one skin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    /// Variant name, also used in output file names.
    pub name: String,
    /// Flat colour used when artwork cannot be fetched.
    pub placeholder_rgba: [u8; 4],
    /// Blurred artwork backdrop.
    pub background: BackgroundStyle,
    /// Glass panel.
    pub panel: PanelStyle,
    /// Shadow under the panel.
    pub shadow: ShadowStyle,
    /// Cover tile.
    pub cover: CoverStyle,
    /// Title, artist and label text.
    pub text: TextStyle,
    /// Progress bar.
    pub progress: BarStyle,
    /// Labels around the progress bar.
    pub labels: ProgressLabels,
    /// Control icon strip.
    pub icons: IconStyle,
    /// Decorative volume bar.
    pub volume: BarStyle,
}

impl StyleProfile {
    /// Dark skin with a hard opaque shadow.
    pub fn bold() -> Self {
        Self {
            name: BOLD.to_string(),
            placeholder_rgba: [20, 20, 30, 255],
            background: BackgroundStyle {
                blur_sigma: 70.0,
                brightness: 0.7,
                tint_rgba: [25, 18, 18, 130],
            },
            panel: PanelStyle {
                size: Size::new(960, 560),
                radius: 60.0,
                glass_rgba: [38, 38, 38, 160],
            },
            shadow: ShadowStyle {
                rgba: [0, 0, 0, 255],
                offset: Offset::new(25, 40),
                radius: 60.0,
                blur_sigma: 0.0,
            },
            cover: CoverStyle {
                size: 250,
                offset: Offset::new(90, 110),
                radius: 40.0,
            },
            text: TextStyle {
                title_offset: Offset::new(420, 130),
                title_max_chars: 42,
                title_rgba: [255, 255, 255, 255],
                title_size_px: 40.0,
                artist_offset: Offset::new(420, 185),
                artist_max_chars: 38,
                artist_rgba: [210, 210, 210, 255],
                artist_size_px: 26.0,
                small_size_px: 22.0,
                label_rgba: [255, 255, 255, 255],
            },
            progress: BarStyle {
                start_x: 420,
                end_x: 900,
                y: 260,
                thickness: 6,
                track_rgba: [170, 170, 170, 255],
                fill_rgba: [255, 255, 255, 255],
                fill: BarFill::Offset { px: 260 },
            },
            labels: ProgressLabels {
                elapsed_text: "0:24".to_string(),
                elapsed_offset: Offset::new(0, -30),
                duration_offset: Offset::new(-60, -30),
            },
            icons: IconStyle {
                size: Size::new(700, 200),
                offset: Offset::new(140, 320),
            },
            volume: BarStyle {
                start_x: 180,
                end_x: 900,
                y: 500,
                thickness: 6,
                track_rgba: [150, 150, 150, 255],
                fill_rgba: [220, 220, 220, 255],
                fill: BarFill::Offset { px: 340 },
            },
        }
    }

    /// Lighter skin with a blurred shadow.
    pub fn soft() -> Self {
        Self {
            name: SOFT.to_string(),
            placeholder_rgba: [40, 40, 44, 255],
            background: BackgroundStyle {
                blur_sigma: 40.0,
                brightness: 0.8,
                tint_rgba: [40, 40, 44, 110],
            },
            panel: PanelStyle {
                size: Size::new(900, 500),
                radius: 40.0,
                glass_rgba: [72, 72, 76, 120],
            },
            shadow: ShadowStyle {
                rgba: [0, 0, 0, 150],
                offset: Offset::new(0, 18),
                radius: 40.0,
                blur_sigma: 18.0,
            },
            cover: CoverStyle {
                size: 220,
                offset: Offset::new(70, 110),
                radius: 28.0,
            },
            text: TextStyle {
                title_offset: Offset::new(340, 120),
                title_max_chars: 40,
                title_rgba: [255, 255, 255, 255],
                title_size_px: 36.0,
                artist_offset: Offset::new(340, 170),
                artist_max_chars: 36,
                artist_rgba: [200, 200, 204, 255],
                artist_size_px: 24.0,
                small_size_px: 20.0,
                label_rgba: [235, 235, 235, 255],
            },
            progress: BarStyle {
                start_x: 340,
                end_x: 830,
                y: 250,
                thickness: 5,
                track_rgba: [120, 120, 124, 255],
                fill_rgba: [235, 235, 235, 255],
                fill: BarFill::Fraction { value: 0.35 },
            },
            labels: ProgressLabels {
                elapsed_text: "0:24".to_string(),
                elapsed_offset: Offset::new(0, -28),
                duration_offset: Offset::new(-56, -28),
            },
            icons: IconStyle {
                size: Size::new(620, 170),
                offset: Offset::new(140, 270),
            },
            volume: BarStyle {
                start_x: 160,
                end_x: 830,
                y: 455,
                thickness: 5,
                track_rgba: [110, 110, 114, 255],
                fill_rgba: [200, 200, 204, 255],
                fill: BarFill::Fraction { value: 0.55 },
            },
        }
    }

    /// Canvas position of the panel's top-left corner.
    pub fn panel_origin(&self) -> Offset {
        self.panel.size.centered_in(Size::canvas())
    }

    /// Reject profiles the compositor cannot draw.
    ///
    /// Every extent is bounded by the canvas and every coordinate by a small multiple of it,
    /// so no layer allocates or offsets beyond what a single card needs.
    pub fn validate(&self) -> CardResult<()> {
        if self.name.trim().is_empty() {
            return Err(CardError::validation("profile name must be non-empty"));
        }
        let canvas = Size::canvas();
        if self.panel.size.is_empty() || !fits_canvas(self.panel.size) {
            return self.invalid("panel must be non-empty and fit the canvas");
        }
        if !sigma_in_range(self.background.blur_sigma) {
            return self.invalid("blur_sigma must be finite and within [0, 200]");
        }
        if !sigma_in_range(self.shadow.blur_sigma) {
            return self.invalid("shadow blur_sigma must be finite and within [0, 200]");
        }
        let brightness = self.background.brightness;
        if !brightness.is_finite() || !(0.0..=16.0).contains(&brightness) {
            return self.invalid("brightness must be finite and within [0, 16]");
        }
        for radius in [self.panel.radius, self.shadow.radius, self.cover.radius] {
            if !radius.is_finite() || radius < 0.0 {
                return self.invalid("corner radii must be finite and >= 0");
            }
        }
        if self.cover.size == 0 || self.cover.size > canvas.height {
            return self.invalid("cover size must be within [1, canvas height]");
        }
        if !fits_canvas(self.icons.size) {
            return self.invalid("icon sheet size must fit the canvas");
        }
        for size in [
            self.text.title_size_px,
            self.text.artist_size_px,
            self.text.small_size_px,
        ] {
            if !size.is_finite() || size <= 0.0 || size > MAX_FONT_SIZE_PX {
                return self.invalid("font sizes must be finite and within (0, 400]");
            }
        }
        for (label, bar) in [("progress", &self.progress), ("volume", &self.volume)] {
            if bar.start_x > bar.end_x || bar.thickness == 0 || bar.thickness > canvas.height {
                return self.invalid(&format!(
                    "{label} bar needs start_x <= end_x and thickness within [1, canvas height]"
                ));
            }
            if ![bar.start_x, bar.end_x, bar.y].iter().all(|v| in_range(*v)) {
                return self.invalid(&format!("{label} bar coordinates are out of range"));
            }
        }
        let offsets = [
            self.shadow.offset,
            self.cover.offset,
            self.text.title_offset,
            self.text.artist_offset,
            self.labels.elapsed_offset,
            self.labels.duration_offset,
            self.icons.offset,
        ];
        if !offsets.iter().all(|o| in_range(o.x) && in_range(o.y)) {
            return self.invalid("offsets are out of range");
        }
        Ok(())
    }

    fn invalid(&self, msg: &str) -> CardResult<()> {
        Err(CardError::validation(format!(
            "profile '{}': {msg}",
            self.name
        )))
    }
}

fn sigma_in_range(sigma: f32) -> bool {
    sigma.is_finite() && (0.0..=MAX_BLUR_SIGMA).contains(&sigma)
}

fn fits_canvas(size: Size) -> bool {
    let canvas = Size::canvas();
    size.width <= canvas.width && size.height <= canvas.height
}

fn in_range(v: i32) -> bool {
    (-COORD_LIMIT..=COORD_LIMIT).contains(&v)
}

/// Lookup table from variant name to profile.
#[derive(Clone, Debug)]
pub struct ProfileTable {
    by_name: BTreeMap<String, StyleProfile>,
}

impl Default for ProfileTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProfileTable {
    /// Table holding `bold` and `soft`.
    pub fn builtin() -> Self {
        let mut by_name = BTreeMap::new();
        for p in [StyleProfile::bold(), StyleProfile::soft()] {
            by_name.insert(p.name.clone(), p);
        }
        Self { by_name }
    }

    /// Look up a profile by variant name.
    pub fn get(&self, name: &str) -> Option<&StyleProfile> {
        self.by_name.get(name)
    }

    /// Add or replace a profile after validating it.
    pub fn insert(&mut self, profile: StyleProfile) -> CardResult<()> {
        profile.validate()?;
        self.by_name.insert(profile.name.clone(), profile);
        Ok(())
    }

    /// Variant names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the table holds no profiles.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/profile.rs"]
mod tests;
