use super::*;

fn frames(keys: &[Keyframe]) -> Vec<u64> {
    keys.iter().map(|k| k.frame).collect()
}

#[test]
fn upsert_keeps_sorted_unique_frames() {
    let mut keys = Vec::new();
    assert_eq!(upsert(&mut keys, 30, 1.0), Upsert::Inserted);
    assert_eq!(upsert(&mut keys, 10, 2.0), Upsert::Inserted);
    assert_eq!(upsert(&mut keys, 20, 3.0), Upsert::Inserted);
    assert_eq!(frames(&keys), vec![10, 20, 30]);

    assert_eq!(upsert(&mut keys, 20, 9.0), Upsert::Replaced);
    assert_eq!(frames(&keys), vec![10, 20, 30]);
    assert_eq!(keys[1].value, 9.0);
}

#[test]
fn upsert_replacement_drops_easing() {
    let mut keys = vec![Keyframe::new(5, 1.0).with_easing(Easing::EaseIn)];
    upsert(&mut keys, 5, 2.0);
    assert_eq!(keys, vec![Keyframe::new(5, 2.0)]);
}

#[test]
fn remove_and_update_require_exact_frame() {
    let mut keys = vec![Keyframe::new(0, 0.0), Keyframe::new(10, 1.0)];
    assert!(!remove(&mut keys, 5));
    assert!(!update(&mut keys, 5, Some(3.0), None));
    assert_eq!(keys.len(), 2);

    assert!(update(&mut keys, 10, None, Some(Easing::EaseOut)));
    assert_eq!(keys[1], Keyframe::new(10, 1.0).with_easing(Easing::EaseOut));

    assert!(remove(&mut keys, 0));
    assert_eq!(frames(&keys), vec![10]);
}

#[test]
fn sample_needs_two_keys() {
    assert_eq!(sample(&[], 3.0), None);
    assert_eq!(sample(&[Keyframe::new(0, 4.0)], 3.0), None);
}

#[test]
fn sample_linear_and_clamped() {
    let keys = vec![Keyframe::new(0, 1.0), Keyframe::new(50, 2.0)];
    assert_eq!(sample(&keys, 25.0), Some(1.5));
    assert_eq!(sample(&keys, -10.0), Some(1.0));
    assert_eq!(sample(&keys, 1000.0), Some(2.0));
    assert_eq!(sample(&keys, 50.0), Some(2.0));
}

#[test]
fn earlier_key_easing_governs_segment() {
    let keys = vec![
        Keyframe::new(0, 0.0).with_easing(Easing::EaseIn),
        Keyframe::new(10, 10.0).with_easing(Easing::EaseOut),
        Keyframe::new(20, 20.0),
    ];
    // First segment uses easeIn (from key 0), second uses easeOut (from key 1).
    assert_eq!(sample(&keys, 5.0), Some(2.5));
    assert_eq!(sample(&keys, 15.0), Some(17.5));
    // Exactly on an interior key.
    assert_eq!(sample(&keys, 10.0), Some(10.0));
}
