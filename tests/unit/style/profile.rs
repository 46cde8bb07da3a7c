use super::*;

#[test]
fn builtin_table_has_both_skins() {
    let t = ProfileTable::builtin();
    assert_eq!(t.names().collect::<Vec<_>>(), vec!["bold", "soft"]);
    assert_eq!(t.get(BOLD).unwrap().name, "bold");
    assert!(t.get("missing").is_none());
}

#[test]
fn builtin_profiles_validate() {
    StyleProfile::bold().validate().unwrap();
    StyleProfile::soft().validate().unwrap();
}

#[test]
fn bold_panel_is_centred() {
    let p = StyleProfile::bold();
    assert_eq!(p.panel_origin(), Offset::new(160, 80));
}

#[test]
fn skins_differ_in_geometry_and_placeholder() {
    let (a, b) = (StyleProfile::bold(), StyleProfile::soft());
    assert_ne!(a.panel, b.panel);
    assert_ne!(a.placeholder_rgba, b.placeholder_rgba);
}

#[test]
fn offset_fill_is_clamped_into_track() {
    let mut bar = StyleProfile::bold().progress;
    assert_eq!(bar.fill_end_x(), 420 + 260);

    bar.fill = BarFill::Offset { px: 10_000 };
    assert_eq!(bar.fill_end_x(), bar.end_x);

    bar.fill = BarFill::Offset { px: -50 };
    assert_eq!(bar.fill_end_x(), bar.start_x);
}

#[test]
fn fraction_fill_is_proportional_and_clamped() {
    let mut bar = StyleProfile::soft().progress;
    bar.start_x = 100;
    bar.end_x = 300;
    bar.fill = BarFill::Fraction { value: 0.25 };
    assert_eq!(bar.fill_end_x(), 150);

    bar.fill = BarFill::Fraction { value: 2.0 };
    assert_eq!(bar.fill_end_x(), 300);

    bar.fill = BarFill::Fraction { value: f32::NAN };
    assert_eq!(bar.fill_end_x(), 100);
}

#[test]
fn insert_rejects_invalid_profile() {
    let mut t = ProfileTable::builtin();
    let mut p = StyleProfile::soft();
    p.name = "broken".to_string();
    p.panel.size = Size::new(2000, 100);
    assert!(matches!(t.insert(p), Err(CardError::Validation(_))));
    assert_eq!(t.len(), 2);
}

#[test]
fn insert_adds_new_skin() {
    let mut t = ProfileTable::builtin();
    let mut p = StyleProfile::soft();
    p.name = "mono".to_string();
    p.background.tint_rgba = [0, 0, 0, 200];
    t.insert(p).unwrap();
    assert_eq!(t.len(), 3);
    assert_eq!(t.get("mono").unwrap().background.tint_rgba, [0, 0, 0, 200]);
}

#[test]
fn profile_json_roundtrip_keeps_fill_policy() {
    let p = StyleProfile::soft();
    let json = serde_json::to_string(&p).unwrap();
    assert!(json.contains(r#""kind":"fraction""#));
    let back: StyleProfile = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
}

#[test]
fn bold_shadow_is_opaque() {
    assert_eq!(StyleProfile::bold().shadow.rgba[3], 255);
}

#[test]
fn extreme_bar_coordinates_do_not_overflow() {
    let mut bar = StyleProfile::bold().progress;
    bar.start_x = i32::MIN;
    bar.end_x = i32::MAX;
    bar.fill = BarFill::Fraction { value: 1.0 };
    assert_eq!(bar.fill_end_x(), i32::MAX);
    assert_eq!(bar.track_len(), u32::MAX);

    bar.fill = BarFill::Offset { px: i32::MAX };
    assert_eq!(bar.fill_end_x(), -1);

    bar.start_x = 10;
    bar.end_x = -10;
    assert_eq!(bar.fill_end_x(), 10);
    assert_eq!(bar.track_len(), 0);

    let mut p = StyleProfile::bold();
    p.progress.start_x = i32::MIN;
    p.progress.end_x = i32::MAX;
    assert!(matches!(p.validate(), Err(CardError::Validation(_))));
}

#[test]
fn oversized_blur_is_rejected() {
    let mut p = StyleProfile::soft();
    p.shadow.blur_sigma = 1e9;
    assert!(matches!(p.validate(), Err(CardError::Validation(_))));

    let mut p = StyleProfile::soft();
    p.background.blur_sigma = f32::INFINITY;
    assert!(p.validate().is_err());

    let mut p = StyleProfile::soft();
    p.shadow.blur_sigma = MAX_BLUR_SIGMA;
    p.validate().unwrap();
}

#[test]
fn layer_extents_are_bounded_by_canvas() {
    let mut p = StyleProfile::bold();
    p.cover.size = u32::MAX;
    assert!(p.validate().is_err());

    let mut p = StyleProfile::bold();
    p.icons.size = Size::new(100_000, 100_000);
    assert!(p.validate().is_err());

    let mut p = StyleProfile::bold();
    p.volume.thickness = u32::MAX;
    assert!(p.validate().is_err());

    let mut p = StyleProfile::bold();
    p.text.title_size_px = 1e9;
    assert!(p.validate().is_err());
}

#[test]
fn huge_offsets_are_rejected() {
    let mut p = StyleProfile::bold();
    p.shadow.offset = Offset::new(i32::MAX, 0);
    assert!(p.validate().is_err());

    let mut p = StyleProfile::bold();
    p.labels.duration_offset = Offset::new(0, i32::MIN);
    assert!(p.validate().is_err());
}
