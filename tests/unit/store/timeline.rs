use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::{
    animation::ease::Easing,
    foundation::config::Tier,
    model::clip::{Filter, FilterKind, Keyframe, Transition, TransitionKind},
};

fn store_with_one_clip_on_track_1() -> TimelineStore {
    let mut project = Project::starter();
    project.clips[0].track_id = TrackId::from("track-1");
    TimelineStore::with_project(project, EditorConfig::default()).unwrap()
}

fn assert_sorted_unique(store: &TimelineStore) {
    for c in &store.project().clips {
        for keys in c.keyframes.values() {
            assert!(keys.windows(2).all(|w| w[0].frame < w[1].frame));
        }
    }
}

#[test]
fn new_store_opens_the_starter_project() {
    let store = TimelineStore::default();
    assert_eq!(store.project().id, "default-project");
    assert_eq!(store.project().tracks.len(), 3);
    assert_eq!(store.current_frame(), 0);
    assert!(!store.is_playing());
    assert_eq!(store.job().status(), JobStatus::Idle);
}

#[test]
fn add_track_names_after_kind() {
    let mut store = TimelineStore::default();
    let id = store.add_track(TrackKind::Audio);
    let t = store.track(&id).unwrap();
    assert_eq!(t.name, "audio Track");
    assert_eq!(store.project().tracks.last().unwrap().id, id);
}

#[test]
fn remove_track_cascades_to_clips() {
    let mut store = TimelineStore::default();
    let t = TrackId::from("track-1");
    for i in 0..3 {
        store
            .add_clip(ClipDraft::video(t.clone(), format!("v{i}"), "a.mp4"))
            .unwrap();
    }
    let before = store.project().clips.len();

    assert!(store.remove_track(&t));
    assert!(store.track(&t).is_none());
    assert!(store.project().clips.iter().all(|c| c.track_id != t));
    assert_eq!(store.project().clips.len(), before - 3);

    assert!(!store.remove_track(&t));
}

#[test]
fn remove_track_clears_selection_of_cascaded_clip() {
    let mut store = TimelineStore::default();
    store.select_clip(Some(ClipId::from("clip-1")));
    store.remove_track(&TrackId::from("track-2"));
    assert_eq!(store.selected_clip(), None);
}

#[test]
fn update_track_sets_flags() {
    let mut store = TimelineStore::default();
    let id = TrackId::from("track-3");
    assert!(store.update_track(
        &id,
        TrackPatch {
            is_muted: Some(true),
            ..TrackPatch::default()
        }
    ));
    assert!(store.track(&id).unwrap().is_muted);
    assert!(!store.update_track(&TrackId::from("nope"), TrackPatch::default()));
}

#[test]
fn add_clip_does_not_check_track() {
    let mut store = TimelineStore::default();
    let id = store
        .add_clip(ClipDraft::text(TrackId::from("ghost"), "t", "hi"))
        .unwrap();
    assert_eq!(store.clip(&id).unwrap().track_id.as_str(), "ghost");
}

#[test]
fn add_clip_rejects_malformed_numbers_and_leaves_project_alone() {
    let mut store = TimelineStore::default();
    let before = store.project().clone();

    let zero = ClipDraft::text(TrackId::from("track-2"), "t", "x").lasting(0);
    assert!(matches!(
        store.add_clip(zero),
        Err(KeylineError::Validation(_))
    ));

    let mut nan = ClipDraft::text(TrackId::from("track-2"), "t", "x");
    nan.opacity = Some(f64::NAN);
    assert!(store.add_clip(nan).is_err());

    let loud = ClipDraft::image(TrackId::from("track-1"), "i", "a.png").with_filter(Filter {
        kind: FilterKind::Blur,
        intensity: 250.0,
    });
    assert!(store.add_clip(loud).is_err());

    let instant = ClipDraft::image(TrackId::from("track-1"), "i", "a.png").with_transition_in(
        Transition {
            kind: TransitionKind::Fade,
            duration: 0,
        },
    );
    assert!(store.add_clip(instant).is_err());

    assert_eq!(store.project(), &before);
}

#[test]
fn eleven_clips_move_and_remove_five() {
    let mut store = store_with_one_clip_on_track_1();
    let t1 = TrackId::from("track-1");

    let mut added = Vec::new();
    for i in 0..10 {
        let draft = ClipDraft::video(t1.clone(), format!("Clip {i}"), "clip.mp4")
            .starting_at(i * 100)
            .lasting(60);
        added.push(store.add_clip(draft).unwrap());
    }
    assert_eq!(store.project().clips.len(), 11);

    let last = added.last().unwrap().clone();
    let patch = ClipPatch {
        start_frame: Some(0),
        track_id: Some(TrackId::from("track-2")),
        ..ClipPatch::default()
    };
    assert!(store.update_clip(&last, patch).unwrap());
    let moved = store.clip(&last).unwrap();
    assert_eq!(moved.start_frame, 0);
    assert_eq!(moved.track_id.as_str(), "track-2");
    assert_eq!(moved.duration_in_frames, 60);

    for id in &added[..5] {
        assert!(store.remove_clip(id));
    }
    assert_eq!(store.project().clips.len(), 6);
}

#[test]
fn update_clip_can_clear_optional_fields() {
    let mut store = TimelineStore::default();
    let id = ClipId::from("clip-1");
    store
        .update_clip(
            &id,
            ClipPatch {
                opacity: Some(Some(0.5)),
                ..ClipPatch::default()
            },
        )
        .unwrap();
    assert_eq!(store.clip(&id).unwrap().opacity, Some(0.5));

    store
        .update_clip(
            &id,
            ClipPatch {
                opacity: Some(None),
                ..ClipPatch::default()
            },
        )
        .unwrap();
    assert_eq!(store.clip(&id).unwrap().opacity, None);
}

#[test]
fn invalid_update_clip_keeps_old_clip() {
    let mut store = TimelineStore::default();
    let id = ClipId::from("clip-1");
    let before = store.clip(&id).unwrap().clone();
    assert!(store.update_clip(&id, ClipPatch::duration(0)).is_err());
    assert_eq!(store.clip(&id).unwrap(), &before);
}

#[test]
fn missing_ids_are_noops() {
    let mut store = TimelineStore::default();
    let snapshot = store.project().clone();
    let ghost = ClipId::from("ghost");

    assert!(!store.update_clip(&ghost, ClipPatch::start_frame(5)).unwrap());
    assert!(!store.remove_clip(&ghost));
    assert_eq!(
        store.add_keyframe(&ghost, Property::Opacity, 1, 0.5).unwrap(),
        None
    );
    assert!(!store.remove_keyframe(&ghost, Property::Opacity, 1));
    assert!(
        !store
            .update_keyframe(&ghost, Property::Opacity, 1, KeyframePatch::default())
            .unwrap()
    );

    // Existing clip, missing property / frame.
    let c1 = ClipId::from("clip-1");
    assert!(!store.remove_keyframe(&c1, Property::Rotation, 3));
    assert!(
        !store
            .update_keyframe(
                &c1,
                Property::Scale,
                3,
                KeyframePatch {
                    value: Some(2.0),
                    easing: None
                }
            )
            .unwrap()
    );

    assert_eq!(store.project(), &snapshot);
}

#[test]
fn opacity_keyframe_add_update_remove() {
    let mut store = TimelineStore::default();
    let c = ClipId::from("clip-1");

    assert_eq!(
        store.add_keyframe(&c, Property::Opacity, 10, 0.5).unwrap(),
        Some(Upsert::Inserted)
    );
    assert_eq!(
        store.clip(&c).unwrap().keyframes_for(Property::Opacity),
        &[Keyframe::new(10, 0.5)]
    );

    assert!(
        store
            .update_keyframe(
                &c,
                Property::Opacity,
                10,
                KeyframePatch {
                    value: Some(0.8),
                    easing: Some(Easing::EaseIn),
                },
            )
            .unwrap()
    );
    assert_eq!(
        store.clip(&c).unwrap().keyframes_for(Property::Opacity),
        &[Keyframe::new(10, 0.8).with_easing(Easing::EaseIn)]
    );

    assert!(store.remove_keyframe(&c, Property::Opacity, 10));
    let clip = store.clip(&c).unwrap();
    assert_eq!(clip.keyframes.get(&Property::Opacity), Some(&Vec::new()));
}

#[test]
fn add_keyframe_twice_replaces() {
    let mut store = TimelineStore::default();
    let c = ClipId::from("clip-1");
    store.add_keyframe(&c, Property::X, 5, 10.0).unwrap();
    assert_eq!(
        store.add_keyframe(&c, Property::X, 5, 20.0).unwrap(),
        Some(Upsert::Replaced)
    );
    assert_eq!(
        store.clip(&c).unwrap().keyframes_for(Property::X),
        &[Keyframe::new(5, 20.0)]
    );
}

#[test]
fn add_then_remove_restores_length_and_order_holds() {
    let mut store = TimelineStore::default();
    let c = ClipId::from("clip-1");
    for (f, v) in [(40, 1.0), (0, 0.0), (20, 0.5), (60, 2.0)] {
        store.add_keyframe(&c, Property::Scale, f, v).unwrap();
        assert_sorted_unique(&store);
    }
    let len = store.clip(&c).unwrap().keyframes_for(Property::Scale).len();

    store.add_keyframe(&c, Property::Scale, 30, 0.7).unwrap();
    assert_sorted_unique(&store);
    assert!(store.remove_keyframe(&c, Property::Scale, 30));
    assert_eq!(
        store.clip(&c).unwrap().keyframes_for(Property::Scale).len(),
        len
    );
    assert_sorted_unique(&store);
}

#[test]
fn non_finite_keyframe_values_are_rejected() {
    let mut store = TimelineStore::default();
    let c = ClipId::from("clip-1");
    assert!(store.add_keyframe(&c, Property::Y, 1, f64::INFINITY).is_err());
    store.add_keyframe(&c, Property::Y, 1, 3.0).unwrap();
    let bad = KeyframePatch {
        value: Some(f64::NAN),
        easing: None,
    };
    assert!(store.update_keyframe(&c, Property::Y, 1, bad).is_err());
    assert_eq!(
        store.clip(&c).unwrap().keyframes_for(Property::Y),
        &[Keyframe::new(1, 3.0)]
    );
}

#[test]
fn keyframe_on_missing_clip_is_a_noop_even_with_bad_value() {
    let mut store = TimelineStore::default();
    let before = store.project().clone();
    assert_eq!(
        store
            .add_keyframe(&ClipId::from("nope"), Property::X, 0, f64::NAN)
            .unwrap(),
        None
    );
    assert_eq!(store.project(), &before);
}

#[test]
fn loaded_project_duration_is_capped() {
    let mut store = TimelineStore::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |e| sink.borrow_mut().push(e.clone()));

    let mut long = Project::starter();
    long.duration_in_frames = 108_000;
    let clamp = store.set_project(long).unwrap();

    let expected = DurationClamp {
        requested: 108_000,
        applied: 14_400,
    };
    assert_eq!(clamp, Some(expected));
    assert_eq!(store.project().duration_in_frames, 14_400);
    assert_eq!(
        *seen.borrow(),
        vec![
            StoreEvent::ProjectReplaced,
            StoreEvent::DurationClamped(expected)
        ]
    );
    assert!(crate::eval::evaluator::evaluate_project_frame(store.project(), 14_400).is_err());

    let pro = EditorConfig {
        tier: Tier::Pro,
        ..EditorConfig::default()
    };
    let mut long = Project::starter();
    long.duration_in_frames = 108_000;
    let store = TimelineStore::with_project(long, pro).unwrap();
    assert_eq!(store.project().duration_in_frames, 108_000);
}

#[test]
fn duration_is_clamped_to_standard_tier() {
    let mut store = TimelineStore::default();
    let outcome = store
        .update_project_settings(SettingsPatch {
            duration_in_frames: Some(100_000),
            ..SettingsPatch::default()
        })
        .unwrap();
    assert_eq!(store.project().duration_in_frames, 30 * 60 * 8);
    assert_eq!(
        outcome.duration_clamp,
        Some(DurationClamp {
            requested: 100_000,
            applied: 14_400
        })
    );
}

#[test]
fn pro_tier_uses_patched_fps() {
    let cfg = EditorConfig {
        tier: Tier::Pro,
        ..EditorConfig::default()
    };
    let mut store = TimelineStore::new(cfg);
    let outcome = store
        .update_project_settings(SettingsPatch {
            fps: Some(60),
            duration_in_frames: Some(1_000_000),
            ..SettingsPatch::default()
        })
        .unwrap();
    assert_eq!(store.project().fps, 60);
    assert_eq!(store.project().duration_in_frames, 60 * 60 * 60);
    assert!(outcome.duration_clamp.is_some());
}

#[test]
fn in_range_duration_is_not_reported() {
    let mut store = TimelineStore::default();
    let outcome = store
        .update_project_settings(SettingsPatch {
            duration_in_frames: Some(900),
            name: Some("Short".to_string()),
            ..SettingsPatch::default()
        })
        .unwrap();
    assert_eq!(outcome.duration_clamp, None);
    assert_eq!(store.project().duration_in_frames, 900);
    assert_eq!(store.project().name, "Short");
}

#[test]
fn zero_fps_is_rejected() {
    let mut store = TimelineStore::default();
    let err = store.update_project_settings(SettingsPatch {
        fps: Some(0),
        ..SettingsPatch::default()
    });
    assert!(err.is_err());
    assert_eq!(store.project().fps, 30);
}

#[test]
fn seek_clamps_and_playback_toggles() {
    let mut store = TimelineStore::default();
    assert_eq!(store.seek(10_000), 300);
    assert_eq!(store.current_frame(), 300);
    store.play();
    assert!(store.is_playing());
    assert!(!store.toggle_playback());
    store.seek(12);
    store.pause();
    assert_eq!(store.current_frame(), 12);
    assert!(!store.is_playing());
}

#[test]
fn removing_selected_clip_clears_selection() {
    let mut store = TimelineStore::default();
    let c = ClipId::from("clip-1");
    store.select_clip(Some(c.clone()));
    assert!(store.remove_clip(&c));
    assert_eq!(store.selected_clip(), None);
}

#[test]
fn set_project_rejects_invalid_and_keeps_current() {
    let mut store = TimelineStore::default();
    let mut bad = Project::starter();
    bad.fps = 0;
    assert!(store.set_project(bad).is_err());
    assert_eq!(store.project(), &Project::starter());
}

#[test]
fn reset_restores_starter_and_idle_state() {
    let mut store = TimelineStore::default();
    store.add_track(TrackKind::Video);
    store.seek(50);
    store.play();
    store.set_job_id(Some(JobId::from("j")));
    store.set_status(JobStatus::Queued).unwrap();

    store.reset();
    assert_eq!(store.project(), &Project::starter());
    assert_eq!(store.current_frame(), 0);
    assert!(!store.is_playing());
    assert_eq!(store.job().status(), JobStatus::Idle);
    assert_eq!(store.job().job_id(), None);
}

#[test]
fn job_updates_flow_through_store() {
    let mut store = TimelineStore::default();
    assert!(store.set_status(JobStatus::Processing).is_err());

    store.set_job_id(Some(JobId::from("render-7")));
    store.set_status(JobStatus::Queued).unwrap();
    let applied = store
        .apply_job_update(JobUpdate {
            job_id: JobId::from("render-7"),
            status: JobStatus::Processing,
            output_url: None,
        })
        .unwrap();
    assert!(applied);
    assert_eq!(store.job().status(), JobStatus::Processing);

    let stale = JobUpdate {
        job_id: JobId::from("render-6"),
        status: JobStatus::Failed,
        output_url: None,
    };
    assert!(!store.apply_job_update(stale).unwrap());
    assert_eq!(store.job().status(), JobStatus::Processing);
}

#[test]
fn subscribers_see_events_until_unsubscribed() {
    let mut store = TimelineStore::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let sub = store.subscribe(move |e| sink.borrow_mut().push(e.clone()));

    store
        .update_project_settings(SettingsPatch {
            duration_in_frames: Some(20_000),
            ..SettingsPatch::default()
        })
        .unwrap();
    store.seek(5);

    assert_eq!(
        *seen.borrow(),
        vec![
            StoreEvent::SettingsChanged,
            StoreEvent::DurationClamped(DurationClamp {
                requested: 20_000,
                applied: 14_400
            }),
            StoreEvent::PlaybackChanged {
                frame: 5,
                playing: false
            },
        ]
    );

    assert!(store.unsubscribe(sub));
    store.seek(6);
    assert_eq!(seen.borrow().len(), 3);
}
