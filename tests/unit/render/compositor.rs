use super::*;

fn flat_art() -> RgbaImage {
    RgbaImage::from_pixel(64, 48, image::Rgba([200, 100, 50, 255]))
}

fn track() -> Track {
    Track::new("t1", "").with_title("Song").with_channel("Band")
}

fn luma(px: [u8; 4]) -> u32 {
    u32::from(px[0]) + u32::from(px[1]) + u32::from(px[2])
}

#[test]
fn card_is_opaque_canvas() {
    let card = compose_card(
        &flat_art(),
        &track(),
        &StyleProfile::bold(),
        &FontSet::Unavailable,
        None,
    )
    .unwrap();
    assert_eq!(card.size(), Size::canvas());
    assert!(card.data().chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn background_is_darkened_and_tinted() {
    let card = compose_card(
        &flat_art(),
        &track(),
        &StyleProfile::bold(),
        &FontSet::Unavailable,
        None,
    )
    .unwrap();
    let corner = card.pixel(5, 5);
    assert!(luma(corner) < 200 + 100 + 50);
    assert!(corner[0] > corner[2]);
}

#[test]
fn shadow_darkens_area_beside_panel() {
    let profile = StyleProfile::bold();
    let card = compose_card(&flat_art(), &track(), &profile, &FontSet::Unavailable, None).unwrap();
    let panel = profile.panel_origin();
    let shadow_only = card.pixel(
        (panel.x + profile.panel.size.width as i32 + 10) as u32,
        (panel.y + profile.panel.size.height as i32 / 2) as u32,
    );
    let plain = card.pixel(5, 5);
    assert!(luma(shadow_only) < luma(plain));
}

#[test]
fn progress_fill_is_drawn_over_track() {
    let profile = StyleProfile::bold();
    let card = compose_card(&flat_art(), &track(), &profile, &FontSet::Unavailable, None).unwrap();
    let panel = profile.panel_origin();
    let bar = &profile.progress;
    let y = (panel.y + bar.y) as u32;

    let fill = card.pixel((panel.x + bar.start_x + 10) as u32, y);
    let rest = card.pixel((panel.x + bar.fill_end_x() + 40) as u32, y);
    assert_eq!(fill, [255, 255, 255, 255]);
    assert_eq!(rest, [170, 170, 170, 255]);
}

#[test]
fn cover_tile_has_rounded_corners() {
    let profile = StyleProfile::bold();
    let art = RgbaImage::from_pixel(64, 64, image::Rgba([0, 255, 0, 255]));
    let card = compose_card(&art, &track(), &profile, &FontSet::Unavailable, None).unwrap();
    let at = profile.panel_origin().shifted_by(profile.cover.offset);
    let s = profile.cover.size as i32;

    let centre = card.pixel((at.x + s / 2) as u32, (at.y + s / 2) as u32);
    assert_eq!(centre, [0, 255, 0, 255]);
    let corner = card.pixel(at.x as u32, at.y as u32);
    assert!(corner[1] < 200, "corner should show the panel, got {corner:?}");
}

#[test]
fn missing_icon_sheet_still_renders() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.png");
    let with_missing = compose_card(
        &flat_art(),
        &track(),
        &StyleProfile::bold(),
        &FontSet::Unavailable,
        Some(&missing),
    )
    .unwrap();
    let without = compose_card(
        &flat_art(),
        &track(),
        &StyleProfile::bold(),
        &FontSet::Unavailable,
        None,
    )
    .unwrap();
    assert_eq!(with_missing.data(), without.data());
}

#[test]
fn icon_sheet_is_resized_and_composited() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("controls.png");
    RgbaImage::from_pixel(10, 4, image::Rgba([255, 0, 0, 255]))
        .save(&path)
        .unwrap();

    let profile = StyleProfile::bold();
    let card = compose_card(
        &flat_art(),
        &track(),
        &profile,
        &FontSet::Unavailable,
        Some(&path),
    )
    .unwrap();
    let at = profile.panel_origin().shifted_by(profile.icons.offset);
    let px = card.pixel(
        (at.x + profile.icons.size.width as i32 / 2) as u32,
        (at.y + profile.icons.size.height as i32 / 4) as u32,
    );
    assert_eq!(px, [255, 0, 0, 255]);
}

#[test]
fn profiles_produce_different_cards() {
    let bold = compose_card(
        &flat_art(),
        &track(),
        &StyleProfile::bold(),
        &FontSet::Unavailable,
        None,
    )
    .unwrap();
    let soft = compose_card(
        &flat_art(),
        &track(),
        &StyleProfile::soft(),
        &FontSet::Unavailable,
        None,
    )
    .unwrap();
    assert_ne!(bold.data(), soft.data());
}

#[test]
fn truncated_title_renders_like_its_prefix() {
    let fonts = FontSet::builtin();
    if fonts.face(FontRole::Title).is_none() {
        return;
    }
    let profile = StyleProfile::bold();
    let max = profile.text.title_max_chars;
    let long: String = "x".repeat(max + 25);
    let short: String = "x".repeat(max);

    let a = compose_card(
        &flat_art(),
        &track().with_title(long),
        &profile,
        &fonts,
        None,
    )
    .unwrap();
    let b = compose_card(
        &flat_art(),
        &track().with_title(short),
        &profile,
        &fonts,
        None,
    )
    .unwrap();
    assert_eq!(a.data(), b.data());
}

#[test]
fn text_changes_pixels_when_a_font_exists() {
    let fonts = FontSet::builtin();
    if fonts.face(FontRole::Title).is_none() {
        return;
    }
    let profile = StyleProfile::bold();
    let with_text = compose_card(&flat_art(), &track(), &profile, &fonts, None).unwrap();
    let without = compose_card(&flat_art(), &track(), &profile, &FontSet::Unavailable, None)
        .unwrap();
    assert_ne!(with_text.data(), without.data());
}

#[test]
fn bold_shadow_beside_panel_is_opaque_black() {
    let profile = StyleProfile::bold();
    let card = compose_card(&flat_art(), &track(), &profile, &FontSet::Unavailable, None).unwrap();
    let panel = profile.panel_origin();
    // Right of the panel, inside the shadow offset, clear of the shadow's rounded corners.
    let px = card.pixel(
        (panel.x + profile.panel.size.width as i32 + 10) as u32,
        (panel.y + profile.panel.size.height as i32 / 2) as u32,
    );
    assert_eq!(px, [0, 0, 0, 255]);
}

#[test]
fn extreme_profiles_are_rejected_instead_of_drawn() {
    let mut huge_blur = StyleProfile::soft();
    huge_blur.shadow.blur_sigma = 1e9;
    let err = compose_card(&flat_art(), &track(), &huge_blur, &FontSet::Unavailable, None)
        .unwrap_err();
    assert!(matches!(err, CardError::Validation(_)));

    let mut wide_bar = StyleProfile::bold();
    wide_bar.progress.start_x = i32::MIN;
    wide_bar.progress.end_x = i32::MAX;
    assert!(compose_card(&flat_art(), &track(), &wide_bar, &FontSet::Unavailable, None).is_err());

    let mut huge_cover = StyleProfile::bold();
    huge_cover.cover.size = u32::MAX;
    assert!(compose_card(&flat_art(), &track(), &huge_cover, &FontSet::Unavailable, None).is_err());
}

#[test]
fn largest_valid_shadow_blur_renders() {
    let mut p = StyleProfile::soft();
    p.shadow.blur_sigma = crate::style::profile::MAX_BLUR_SIGMA;
    let card = compose_card(&flat_art(), &track(), &p, &FontSet::Unavailable, None).unwrap();
    assert_eq!(card.size(), Size::canvas());
}

#[test]
fn reversed_bar_draws_nothing() {
    let mut bar = StyleProfile::bold().progress;
    bar.start_x = 50;
    bar.end_x = 10;
    let mut canvas = Surface::new(Size::new(100, 20));
    draw_bar(&mut canvas, &bar, Offset::new(0, -250));
    assert!(canvas.data().iter().all(|b| *b == 0));
}
