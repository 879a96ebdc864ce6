use super::*;
use crate::{
    eval::evaluator::evaluate_project_frame,
    model::clip::{Keyframe, Property},
    model::project::Project,
};

#[test]
fn same_frame_same_digest() {
    let p = Project::starter();
    let a = fingerprint_frame(&evaluate_project_frame(&p, 12).unwrap());
    let b = fingerprint_frame(&evaluate_project_frame(&p, 12).unwrap());
    assert_eq!(a, b);
}

#[test]
fn animated_frames_differ() {
    let mut p = Project::starter();
    p.clips[0].keyframes.insert(
        Property::Opacity,
        vec![Keyframe::new(0, 0.0), Keyframe::new(30, 1.0)],
    );
    let a = fingerprint_frame(&evaluate_project_frame(&p, 5).unwrap());
    let b = fingerprint_frame(&evaluate_project_frame(&p, 6).unwrap());
    assert_ne!(a, b);
}

#[test]
fn visual_digest_sees_filters() {
    let plain = ResolvedVisual::default();
    let blurred = ResolvedVisual {
        filter: Some(FilterDescriptor::Blur { radius_px: 1.0 }),
        ..plain
    };
    assert_ne!(fingerprint_visual(&plain), fingerprint_visual(&blurred));
    assert_ne!(fingerprint_visual(&plain).hi, fingerprint_visual(&plain).lo);
}
