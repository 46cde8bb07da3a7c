use super::*;

#[test]
fn defaults_match_documented_asset_layout() {
    let cfg = RenderConfig::default();
    assert_eq!(cfg.cache_dir, PathBuf::from("cache"));
    assert_eq!(cfg.default_thumb, PathBuf::from("assets/default_thumb.png"));
    assert_eq!(cfg.fetch_timeout(), Duration::from_secs(6));
    assert_eq!(cfg.font_paths().title, PathBuf::from("assets/fonts/Raleway-Bold.ttf"));
    cfg.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg.json");
    std::fs::write(&path, r#"{ "cache_dir": "out", "fetch_timeout_ms": 250 }"#).unwrap();

    let cfg = RenderConfig::from_path(&path).unwrap();
    assert_eq!(cfg.cache_dir, PathBuf::from("out"));
    assert_eq!(cfg.fetch_timeout(), Duration::from_millis(250));
    assert_eq!(cfg.body_font, RenderConfig::default().body_font);
}

#[test]
fn zero_timeout_is_rejected() {
    let cfg = RenderConfig {
        fetch_timeout_ms: 0,
        ..RenderConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(CardError::Validation(_))));
}

#[test]
fn unreadable_or_malformed_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(RenderConfig::from_path(dir.path().join("missing.json")).is_err());

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{ not json").unwrap();
    assert!(RenderConfig::from_path(&bad).is_err());
}

#[test]
fn configured_profiles_extend_the_builtin_table() {
    let mut mono = StyleProfile::soft();
    mono.name = "mono".to_owned();
    mono.background.tint_rgba = [0, 0, 0, 160];

    let cfg = RenderConfig {
        profiles: vec![mono.clone()],
        ..RenderConfig::default()
    };
    let table = cfg.profile_table().unwrap();
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["bold", "mono", "soft"]);
    assert_eq!(table.get("mono"), Some(&mono));
}

#[test]
fn profiles_round_trip_through_json_config() {
    let mut custom = StyleProfile::bold();
    custom.name = "bold".to_owned();
    custom.panel.radius = 12.0;
    let cfg = RenderConfig {
        profiles: vec![custom],
        ..RenderConfig::default()
    };

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg.json");
    std::fs::write(&path, serde_json::to_string_pretty(&cfg).unwrap()).unwrap();

    let loaded = RenderConfig::from_path(&path).unwrap();
    let table = loaded.profile_table().unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("bold").unwrap().panel.radius, 12.0);
}
