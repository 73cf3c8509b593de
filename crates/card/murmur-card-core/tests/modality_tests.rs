use murmur_card_core::{
    CardCfg, CardCommand, CardEvent, CardSpec, Config, DragTrack, Engine, HoldTimer, Hook, Inputs,
    Modality, Stage, StageTimings, TapCounter,
};

fn spec(hook: Hook) -> CardSpec {
    CardSpec {
        hook,
        ..Default::default()
    }
}

/// Arriving resolves on the first tick; Active waits for the modality.
fn interactive_cfg() -> CardCfg {
    CardCfg {
        timings: Some(StageTimings {
            arriving: 0.0,
            active: None,
            resonant: 10.0,
        }),
        ..Default::default()
    }
}

fn cmds(cmds: Vec<CardCommand>) -> Inputs {
    Inputs { card_cmds: cmds }
}

/// it should reset hold progress on early release and complete once at threshold
#[test]
fn hold_early_release_resets_then_completes() {
    let mut eng = Engine::new(Config::default());
    let id = eng.mount_card(
        spec(Hook::Hold),
        CardCfg {
            hold_threshold: Some(1.5),
            ..interactive_cfg()
        },
    );
    eng.update(0.0, Inputs::default());
    assert_eq!(eng.card_stage(id), Some(Stage::Active));

    // Hold for 1.4s, then release early.
    eng.update(0.0, cmds(vec![CardCommand::PointerDown { card: id }]));
    eng.update(1.4, Inputs::default());
    assert!(eng.card_progress(id).unwrap() > 0.9);
    let out = eng.update(0.0, cmds(vec![CardCommand::PointerUp { card: id }]));
    assert!(out
        .events
        .iter()
        .all(|e| !matches!(e, CardEvent::ModalityCompleted { .. })));
    assert_eq!(eng.card_progress(id), Some(0.0));
    assert_eq!(eng.card_stage(id), Some(Stage::Active));

    // Hold uninterrupted past the threshold.
    eng.update(0.0, cmds(vec![CardCommand::PointerDown { card: id }]));
    let out = eng.update(1.5, Inputs::default());
    let completions = out
        .events
        .iter()
        .filter(|e| matches!(e, CardEvent::ModalityCompleted { .. }))
        .count();
    assert_eq!(completions, 1);
    assert_eq!(eng.card_stage(id), Some(Stage::Resonant));
    assert_eq!(eng.card_progress(id), Some(1.0));
}

/// it should stop hold accrual the moment the pointer lifts
#[test]
fn hold_does_not_accrue_after_release() {
    let mut h = HoldTimer::new(1.0);
    h.press();
    h.tick(0.5);
    h.release();
    // No loop left running: further ticks accrue nothing.
    h.tick(5.0);
    assert!(!h.completed());
    assert_eq!(h.progress(), 0.0);
}

/// it should treat drag completion as terminal even when dragged back
#[test]
fn drag_threshold_is_terminal() {
    let mut d = DragTrack::new(96.0);
    d.move_to(97.0, 100.0);
    assert!(d.completed());
    d.move_to(10.0, 100.0);
    assert!(d.completed());
    assert_eq!(d.progress(), 1.0);

    // Out-of-range input is clamped, zero-width tracks are ignored.
    d.reset();
    d.move_to(-50.0, 100.0);
    assert_eq!(d.percent(), 0.0);
    d.move_to(250.0, 100.0);
    assert!(d.completed());
    d.reset();
    d.move_to(10.0, 0.0);
    assert_eq!(d.percent(), 0.0);

    // A NaN width or x must not poison the percentage.
    d.move_to(10.0, f32::NAN);
    assert_eq!(d.percent(), 0.0);
    d.move_to(f32::NAN, 100.0);
    assert_eq!(d.percent(), 0.0);
    assert!(!d.completed());
}

/// it should advance a drag card when the pointer crosses the threshold
#[test]
fn drag_card_advances_on_threshold() {
    let mut eng = Engine::new(Config::default());
    let id = eng.mount_card(spec(Hook::Drag), interactive_cfg());
    eng.update(0.0, Inputs::default());

    eng.update(
        0.016,
        cmds(vec![CardCommand::PointerMove {
            card: id,
            x: 50.0,
            width: 100.0,
        }]),
    );
    assert_eq!(eng.card_stage(id), Some(Stage::Active));
    let out = eng.update(
        0.016,
        cmds(vec![CardCommand::PointerMove {
            card: id,
            x: 97.0,
            width: 100.0,
        }]),
    );
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, CardEvent::ModalityCompleted { .. })));
    assert_eq!(eng.card_stage(id), Some(Stage::Resonant));
}

/// it should count taps only in the interactive stage and stop at the target
#[test]
fn tap_gating_and_target() {
    let mut eng = Engine::new(Config::default());
    let id = eng.mount_card(
        spec(Hook::Tap),
        CardCfg {
            tap_target: Some(3),
            timings: Some(StageTimings {
                arriving: 1.0,
                active: None,
                resonant: 10.0,
            }),
            ..Default::default()
        },
    );

    // Taps during Arriving are dropped.
    eng.update(0.1, cmds(vec![CardCommand::Tap { card: id }]));
    assert_eq!(eng.card_progress(id), Some(0.0));

    // Reach Active, then tap past the target.
    eng.update(1.0, Inputs::default());
    assert_eq!(eng.card_stage(id), Some(Stage::Active));
    let out = eng.update(
        0.1,
        cmds(vec![
            CardCommand::Tap { card: id },
            CardCommand::Tap { card: id },
            CardCommand::Tap { card: id },
            CardCommand::Tap { card: id },
            CardCommand::Tap { card: id },
        ]),
    );
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, CardEvent::ModalityCompleted { .. })));
    match &eng.card(id).unwrap().modality {
        Modality::Tap(t) => assert_eq!(t.count(), 3),
        other => panic!("expected tap modality, got {other:?}"),
    }
}

/// it should complete an observe card after its dwell with no input at all
#[test]
fn observe_completes_without_input() {
    let mut eng = Engine::new(Config::default());
    let id = eng.mount_card(
        spec(Hook::Observe),
        CardCfg {
            observe_dwell: Some(0.5),
            ..interactive_cfg()
        },
    );
    eng.update(0.0, Inputs::default());

    eng.update(0.3, Inputs::default());
    assert_eq!(eng.card_stage(id), Some(Stage::Active));
    let out = eng.update(0.3, Inputs::default());
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, CardEvent::ModalityCompleted { .. })));
    assert_eq!(eng.card_stage(id), Some(Stage::Resonant));
}

/// it should drive a type card through reject and accept via commands
#[test]
fn type_card_end_to_end() {
    let mut eng = Engine::new(Config::default());
    let id = eng.mount_card(
        spec(Hook::Type),
        CardCfg {
            type_rules: Some(murmur_card_core::TypeRules {
                accept_phrases: vec!["i am here".to_string()],
                reject_phrases: vec!["cannot".to_string()],
                ..Default::default()
            }),
            ..interactive_cfg()
        },
    );
    eng.update(0.0, Inputs::default());

    let out = eng.update(
        0.016,
        cmds(vec![
            CardCommand::SetText {
                card: id,
                text: "I cannot do this".to_string(),
            },
            CardCommand::Submit { card: id },
        ]),
    );
    assert!(out.events.iter().any(|e| matches!(
        e,
        CardEvent::TextRejected { shake_count: 1, .. }
    )));
    assert_eq!(eng.card_stage(id), Some(Stage::Active));

    let out = eng.update(
        0.016,
        cmds(vec![
            CardCommand::SetText {
                card: id,
                text: "ok. I am here.".to_string(),
            },
            CardCommand::Submit { card: id },
        ]),
    );
    let accepted_text = out.events.iter().find_map(|e| match e {
        CardEvent::TextAccepted { text, .. } => Some(text.clone()),
        _ => None,
    });
    assert_eq!(accepted_text.as_deref(), Some("ok. I am here."));
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, CardEvent::ModalityCompleted { .. })));
    assert_eq!(eng.card_stage(id), Some(Stage::Resonant));
    assert_eq!(eng.card_progress(id), Some(1.0));
}

/// it should keep tap progress normalized against the target
#[test]
fn tap_counter_progress() {
    let mut t = TapCounter::new(4);
    assert_eq!(t.progress(), 0.0);
    t.tap();
    t.tap();
    assert_eq!(t.progress(), 0.5);
    t.tap();
    t.tap();
    assert!(t.completed());
    t.tap();
    assert_eq!(t.count(), 4);

    // A zero target is vacuously complete rather than a dead end.
    let z = TapCounter::new(0);
    assert!(z.completed());
    assert_eq!(z.progress(), 1.0);
}
