use super::*;

fn tr(kind: TransitionKind, duration: u64) -> Transition {
    Transition { kind, duration }
}

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn window_progress_in_and_out() {
    let t = tr(TransitionKind::Fade, 10);
    approx(window_progress(TransitionEdge::In, &t, 0.0, 90.0), 0.0);
    approx(window_progress(TransitionEdge::In, &t, 5.0, 90.0), 0.5);
    approx(window_progress(TransitionEdge::In, &t, 40.0, 90.0), 1.0);

    approx(window_progress(TransitionEdge::Out, &t, 50.0, 90.0), 0.0);
    approx(window_progress(TransitionEdge::Out, &t, 85.0, 90.0), 0.5);
    approx(window_progress(TransitionEdge::Out, &t, 90.0, 90.0), 1.0);
}

#[test]
fn fade_edges_scale_opacity() {
    let mut v = ResolvedVisual::default();
    apply(TransitionEdge::In, TransitionKind::Fade, 0.25, &mut v);
    approx(v.opacity, 0.25);
    apply(TransitionEdge::Out, TransitionKind::Fade, 0.5, &mut v);
    approx(v.opacity, 0.125);
}

#[test]
fn slide_and_zoom_hit_their_endpoints() {
    let mut v = ResolvedVisual::default();
    apply(TransitionEdge::In, TransitionKind::Slide, 0.0, &mut v);
    approx(v.translate_y, SLIDE_DISTANCE_PX);

    let mut v = ResolvedVisual::default();
    apply(TransitionEdge::In, TransitionKind::Slide, 1.0, &mut v);
    approx(v.translate_y, 0.0);

    let mut v = ResolvedVisual::default();
    apply(TransitionEdge::Out, TransitionKind::Zoom, 1.0, &mut v);
    approx(v.scale, 0.0);

    let mut v = ResolvedVisual::default();
    apply(TransitionEdge::In, TransitionKind::Zoom, 0.5, &mut v);
    assert!(v.scale > 0.5, "ease-out ramp runs ahead of linear");
}

#[test]
fn wipes_combine_insets() {
    let mut v = ResolvedVisual::default();
    apply(TransitionEdge::In, TransitionKind::Wipe, 0.25, &mut v);
    apply(TransitionEdge::Out, TransitionKind::Wipe, 0.5, &mut v);
    approx(v.clip_region.right_pct, 75.0);
    approx(v.clip_region.left_pct, 50.0);
}
