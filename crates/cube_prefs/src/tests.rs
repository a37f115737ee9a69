use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_default_yaml_matches_default_impl() {
    assert_eq!(*DEFAULT_PREFS, Preferences::default());
    assert_eq!(Preferences::load(None), Preferences::default());
}

#[test]
fn test_user_file_overrides_defaults() {
    let dir = tempfile::tempdir().expect("error creating temp dir");
    let path = dir.path().join("prefs.yaml");
    std::fs::write(
        &path,
        "animation:\n  dynamic_twist_speed: false\ninteraction:\n  drag_threshold: 8.0\n",
    )
    .expect("error writing prefs");

    let prefs = Preferences::load(Some(&path));
    assert!(!prefs.animation.dynamic_twist_speed);
    assert_eq!(prefs.interaction.drag_threshold, 8.0);
    // Unspecified values fall through to the defaults.
    assert_eq!(prefs.animation.twist_duration, 0.3);
    assert_eq!(prefs.interaction.manual_input_queue_limit, 5);
}

#[test]
fn test_bad_user_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("error creating temp dir");
    let path = dir.path().join("prefs.yaml");
    std::fs::write(&path, "animation: [this is not a map").expect("error writing prefs");
    assert_eq!(Preferences::load(Some(&path)), Preferences::default());

    let missing = dir.path().join("missing.yaml");
    assert_eq!(Preferences::load(Some(&missing)), Preferences::default());
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().expect("error creating temp dir");
    let path = dir.path().join("nested").join("prefs.yaml");
    let mut prefs = Preferences::default();
    prefs.animation.twist_interpolation = InterpolateFn::Cubic;
    prefs.interaction.manual_input_queue_limit = 12;
    prefs.save(&path).expect("error saving prefs");
    assert_eq!(Preferences::load(Some(&path)), prefs);
}

#[test]
fn test_interpolation_endpoints() {
    use strum::IntoEnumIterator;

    for f in InterpolateFn::iter() {
        assert_eq!(f.interpolate(0.0), 0.0);
        assert!((f.interpolate(1.0) - 1.0).abs() < 1e-6, "{f}");
        assert!((f.interpolate(0.5) - 0.5).abs() < 1e-6, "{f}");
        assert_eq!(f.interpolate(2.0), f.interpolate(1.0));
    }
}
