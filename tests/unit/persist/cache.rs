use super::*;
use crate::foundation::core::Size;

#[test]
fn path_is_id_underscore_variant() {
    let cache = CardCache::new("cache");
    assert_eq!(
        cache.path_for("abc123", "bold").unwrap(),
        PathBuf::from("cache/abc123_bold.png")
    );
}

#[test]
fn unsafe_characters_are_replaced() {
    assert_eq!(sanitize_component("a/b\\c d"), "a_b_c_d");
    assert_eq!(sanitize_component("x-y_z.1"), "x-y_z.1");
    let cache = CardCache::new("cache");
    assert_eq!(
        cache.path_for("../etc", "bold").unwrap(),
        PathBuf::from("cache/.._etc_bold.png")
    );
}

#[test]
fn empty_id_is_validation_error() {
    let cache = CardCache::new("cache");
    let err = cache.path_for("  ", "bold").unwrap_err();
    assert!(matches!(err, CardError::Validation(_)));
}

#[test]
fn save_creates_dir_and_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let cache = CardCache::new(dir.path().join("nested").join("cache"));
    let surface = Surface::solid(Size::new(8, 4), [10, 20, 30, 255]);

    let path = cache.save(&surface, "t1", "bold").unwrap();
    assert!(path.ends_with("t1_bold.png"));
    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (8, 4));
    assert_eq!(img.get_pixel(3, 2).0, [10, 20, 30, 255]);
}

#[test]
fn second_save_overwrites_and_leaves_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let cache = CardCache::new(dir.path());

    let first = cache
        .save(&Surface::solid(Size::new(4, 4), [255, 0, 0, 255]), "t1", "soft")
        .unwrap();
    let second = cache
        .save(&Surface::solid(Size::new(4, 4), [0, 0, 255, 255]), "t1", "soft")
        .unwrap();
    assert_eq!(first, second);

    let img = image::open(&second).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 255, 255]);

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn concurrent_saves_leave_one_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let cache = CardCache::new(dir.path());
    std::thread::scope(|s| {
        for i in 0..4u8 {
            let cache = &cache;
            s.spawn(move || {
                let surface = Surface::solid(Size::new(16, 16), [i * 40, 0, 0, 255]);
                cache.save(&surface, "race", "bold").unwrap();
            });
        }
    });
    let path = cache.path_for("race", "bold").unwrap();
    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (16, 16));
}
