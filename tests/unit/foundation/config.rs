use super::*;

#[test]
fn standard_tier_caps_at_eight_minutes() {
    assert_eq!(Tier::Standard.max_duration_frames(30), 14_400);
    assert_eq!(Tier::Pro.max_duration_frames(30), 108_000);
    assert_eq!(Tier::Standard.max_duration_frames(24), 24 * 60 * 8);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = EditorConfig::from_json(r#"{ "tier": "pro" }"#).unwrap();
    assert_eq!(cfg.tier, Tier::Pro);
    assert_eq!(cfg.pixels_per_frame, PIXELS_PER_FRAME);
    assert_eq!(cfg.drag_throttle(), Duration::from_millis(16));
}

#[test]
fn rejects_non_positive_scale() {
    assert!(EditorConfig::from_json(r#"{ "pixels_per_frame": 0.0 }"#).is_err());
    let cfg = EditorConfig {
        pixels_per_frame: f64::NAN,
        ..EditorConfig::default()
    };
    assert!(cfg.validate().is_err());
}
