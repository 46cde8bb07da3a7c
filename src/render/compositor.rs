//! Fixed z-order card compositor.
//!
//! Layers, bottom to top: blurred background with tint, panel shadow, glass panel, cover tile,
//! title/artist text, progress bar with labels, control icons, volume bar. The first four
//! layers are required; the rest are decorative and skipped individually when they fail.

use std::path::Path;

use image::{RgbaImage, imageops::FilterType};
use tracing::{debug, warn};

use crate::{
    assets::{
        decode::fit,
        fonts::{FontRole, FontSet},
    },
    foundation::{
        core::{Offset, Size},
        error::{CardError, CardResult},
    },
    model::track::Track,
    render::{
        blur::gaussian_blur_in_place,
        composite::{composite_over_at, fill_rect, fill_rounded_rect},
        mask::RoundedMask,
        surface::Surface,
        text::TextLayoutEngine,
    },
    style::profile::{BarStyle, StyleProfile, TextStyle},
};

/// Extra margin per unit of sigma kept around a blurred shadow so its falloff is not clipped.
const SHADOW_PAD_PER_SIGMA: f32 = 3.0;

/// Compose one card from already-fetched artwork.
///
/// The profile is validated first, so every layer size and offset below stays bounded.
pub fn compose_card(
    art: &RgbaImage,
    track: &Track,
    profile: &StyleProfile,
    fonts: &FontSet,
    icon_sheet: Option<&Path>,
) -> CardResult<Surface> {
    profile.validate()?;
    let panel_at = profile.panel_origin();

    let mut canvas = background_layer(art, profile)?;
    shadow_layer(&mut canvas, profile, panel_at)?;
    fill_rounded_rect(
        &mut canvas,
        panel_at,
        profile.panel.size,
        profile.panel.glass_rgba,
        profile.panel.radius,
    );
    cover_layer(&mut canvas, art, profile, panel_at)?;
    debug!(profile = %profile.name, "required layers composed");

    let mut text = TextLayoutEngine::new();
    if let Err(err) = text_layer(&mut canvas, &mut text, track, profile, fonts, panel_at) {
        warn!(error = %err, "skipping text layer");
    }

    draw_bar(&mut canvas, &profile.progress, panel_at);
    if let Err(err) = progress_labels(&mut canvas, &mut text, track, profile, fonts, panel_at) {
        warn!(error = %err, "skipping progress labels");
    }

    match icon_sheet {
        Some(path) => {
            if let Err(err) = icon_layer(&mut canvas, path, profile, panel_at) {
                warn!(error = %err, path = %path.display(), "skipping control icons");
            }
        }
        None => debug!("no icon sheet configured"),
    }

    draw_bar(&mut canvas, &profile.volume, panel_at);
    Ok(canvas)
}

fn background_layer(art: &RgbaImage, profile: &StyleProfile) -> CardResult<Surface> {
    let bg = &profile.background;
    let fitted = fit(art, Size::canvas());
    let mut canvas = Surface::from_rgba_image(fitted);
    if canvas.size() != Size::canvas() {
        return Err(CardError::render("background does not cover the canvas"));
    }
    gaussian_blur_in_place(&mut canvas, bg.blur_sigma);
    canvas.scale_brightness(bg.brightness);
    fill_rect(&mut canvas, Offset::ZERO, Size::canvas(), bg.tint_rgba);
    Ok(canvas)
}

fn shadow_layer(canvas: &mut Surface, profile: &StyleProfile, panel_at: Offset) -> CardResult<()> {
    let shadow = &profile.shadow;
    let at = panel_at.shifted_by(shadow.offset);
    if shadow.blur_sigma < 0.5 {
        fill_rounded_rect(canvas, at, profile.panel.size, shadow.rgba, shadow.radius);
        return Ok(());
    }

    let too_large = || CardError::render("shadow layer too large");
    let pad_f = (shadow.blur_sigma * SHADOW_PAD_PER_SIGMA).ceil();
    if !pad_f.is_finite() || pad_f > f32::from(u16::MAX) {
        return Err(too_large());
    }
    let pad = pad_f as u32;
    let size = profile.panel.size;
    let grow = pad.checked_mul(2).ok_or_else(too_large)?;
    let padded = Size::new(
        size.width.checked_add(grow).ok_or_else(too_large)?,
        size.height.checked_add(grow).ok_or_else(too_large)?,
    );
    let limit = Size::canvas().pixel_count().saturating_mul(4);
    if padded.pixel_count() > limit {
        return Err(too_large());
    }
    let pad_i = i32::try_from(pad).map_err(|_| too_large())?;

    let mut layer = Surface::new(padded);
    fill_rounded_rect(
        &mut layer,
        Offset::new(pad_i, pad_i),
        size,
        shadow.rgba,
        shadow.radius,
    );
    gaussian_blur_in_place(&mut layer, shadow.blur_sigma);
    composite_over_at(canvas, &layer, at.translate(-pad_i, -pad_i), None);
    Ok(())
}

fn cover_layer(
    canvas: &mut Surface,
    art: &RgbaImage,
    profile: &StyleProfile,
    panel_at: Offset,
) -> CardResult<()> {
    let cover = &profile.cover;
    let tile = fit(art, Size::new(cover.size, cover.size));
    let tile = Surface::from_rgba_image(tile);
    if tile.size().is_empty() {
        return Err(CardError::render("cover tile is empty"));
    }
    composite_over_at(
        canvas,
        &tile,
        panel_at.shifted_by(cover.offset),
        Some(RoundedMask::new(cover.radius)),
    );
    Ok(())
}

fn text_layer(
    canvas: &mut Surface,
    engine: &mut TextLayoutEngine,
    track: &Track,
    profile: &StyleProfile,
    fonts: &FontSet,
    panel_at: Offset,
) -> CardResult<()> {
    let style = &profile.text;
    draw_text(
        canvas,
        engine,
        fonts,
        FontRole::Title,
        &track.display_title(style.title_max_chars),
        style.title_rgba,
        panel_at.shifted_by(style.title_offset),
        style,
    )?;
    draw_text(
        canvas,
        engine,
        fonts,
        FontRole::Artist,
        &track.display_artist(style.artist_max_chars),
        style.artist_rgba,
        panel_at.shifted_by(style.artist_offset),
        style,
    )
}

fn progress_labels(
    canvas: &mut Surface,
    engine: &mut TextLayoutEngine,
    track: &Track,
    profile: &StyleProfile,
    fonts: &FontSet,
    panel_at: Offset,
) -> CardResult<()> {
    let bar = &profile.progress;
    let labels = &profile.labels;
    let style = &profile.text;
    let bar_start = panel_at.translate(bar.start_x, bar.y);
    let bar_end = panel_at.translate(bar.end_x, bar.y);

    draw_text(
        canvas,
        engine,
        fonts,
        FontRole::Small,
        &labels.elapsed_text,
        style.label_rgba,
        bar_start.shifted_by(labels.elapsed_offset),
        style,
    )?;
    draw_text(
        canvas,
        engine,
        fonts,
        FontRole::Small,
        track.display_duration(),
        style.label_rgba,
        bar_end.shifted_by(labels.duration_offset),
        style,
    )
}

#[allow(clippy::too_many_arguments)]
fn draw_text(
    canvas: &mut Surface,
    engine: &mut TextLayoutEngine,
    fonts: &FontSet,
    role: FontRole,
    text: &str,
    rgba: [u8; 4],
    at: Offset,
    style: &TextStyle,
) -> CardResult<()> {
    let Some(face) = fonts.face(role) else {
        return Err(CardError::asset_missing("no font face available"));
    };
    let size_px = fonts.size_px(role, style);
    if let Some(sprite) = engine.render_line(text, face, size_px, rgba)? {
        let shift = sprite.origin_shift;
        composite_over_at(canvas, &sprite.surface, at.translate(-shift, -shift), None);
    }
    Ok(())
}

fn icon_layer(
    canvas: &mut Surface,
    path: &Path,
    profile: &StyleProfile,
    panel_at: Offset,
) -> CardResult<()> {
    let icons = &profile.icons;
    if icons.size.is_empty() {
        return Ok(());
    }
    let sheet = image::open(path)
        .map_err(|e| CardError::asset_missing(format!("icon sheet '{}': {e}", path.display())))?
        .to_rgba8();
    let resized = image::imageops::resize(
        &sheet,
        icons.size.width,
        icons.size.height,
        FilterType::Lanczos3,
    );
    let layer = Surface::from_rgba_image(resized);
    composite_over_at(canvas, &layer, panel_at.shifted_by(icons.offset), None);
    Ok(())
}

/// Track segment first, then the bright fill over it.
fn draw_bar(canvas: &mut Surface, bar: &BarStyle, panel_at: Offset) {
    let half = i32::try_from(bar.thickness / 2).unwrap_or(i32::MAX);
    let top = bar.y.saturating_sub(half);
    let track_len = bar.track_len();
    let fill_len = (i64::from(bar.fill_end_x()) - i64::from(bar.start_x))
        .clamp(0, i64::from(track_len));
    let fill_len = u32::try_from(fill_len).unwrap_or(track_len);
    let at = panel_at.translate(bar.start_x, top);

    fill_rect(canvas, at, Size::new(track_len, bar.thickness), bar.track_rgba);
    fill_rect(canvas, at, Size::new(fill_len, bar.thickness), bar.fill_rgba);
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
