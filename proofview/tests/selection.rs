use proofview::bridge::{BridgeCall, BridgeError, OverlayHandle, Recorder, RenderBridge};
use proofview::config::Palette;
use proofview::{decode, Color, RenderKind, SelectError, SelectionRegistry, Toggled};
use proptest::prelude::*;
use std::collections::HashMap;

const POINTS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

fn registry() -> SelectionRegistry<Recorder> {
    SelectionRegistry::new(Recorder::new(POINTS).with_point_markers(true), Palette::default())
}

#[test]
fn shared_point_is_reference_counted() {
    let mut r = registry();
    let ab = decode("seg__A__B").unwrap();
    let bc = decode("seg__B__C").unwrap();
    r.toggle(&ab).unwrap();
    r.toggle(&bc).unwrap();
    assert_eq!(r.point_usage("B"), 2);
    assert!(r.bridge().is_highlighted("B"));

    r.toggle(&ab).unwrap();
    assert_eq!(r.point_usage("B"), 1);
    assert!(r.is_highlighted("B"));
    assert!(r.bridge().is_highlighted("B"));
    assert!(!r.bridge().is_highlighted("A"));

    r.toggle(&bc).unwrap();
    assert_eq!(r.point_usage("B"), 0);
    assert!(!r.bridge().is_highlighted("B"));
    assert!(r.bridge().live_overlays().is_empty());
}

#[test]
fn select_emits_highlights_then_lines_in_slot_color() {
    let mut r = registry();
    let out = r.toggle(&decode("ang__A__B__C").unwrap()).unwrap();
    let red = Color::from_hex("#F4433680").unwrap();
    assert_eq!(out, Toggled::Selected { key: "ang__A__B__C".into(), slot: 0, color: red });
    let calls = r.bridge_mut().drain_calls();
    assert_eq!(&calls[..3], &[
        BridgeCall::Highlight { point: "A".into() },
        BridgeCall::Highlight { point: "B".into() },
        BridgeCall::Highlight { point: "C".into() },
    ]);
    assert_eq!(
        calls[3],
        BridgeCall::CreateLine {
            handle: OverlayHandle(0),
            start: "B".into(),
            end: "A".into(),
            kind: RenderKind::Ray,
            color: red,
        }
    );
    // two rays + three point markers
    assert_eq!(calls.len(), 3 + 2 + 3);
    let entry = r.entry("ang__A__B__C").unwrap();
    assert_eq!(entry.overlays.len(), 2);
    assert_eq!(entry.point_overlays.len(), 3);
}

#[test]
fn second_selection_takes_the_next_color() {
    let mut r = registry();
    r.toggle(&decode("tr__A__B__C").unwrap()).unwrap();
    let out = r.toggle(&decode("seg__D__E").unwrap()).unwrap();
    assert!(matches!(out, Toggled::Selected { slot: 1, .. }));
    assert_eq!(r.slot_usage(), &[1, 1, 0, 0, 0]);
}

#[test]
fn single_color_palette_shares_one_slot() {
    let cyan = Color::from_hex("#00E6E3").unwrap();
    let mut r = SelectionRegistry::new(Recorder::new(POINTS), Palette::single(cyan));
    r.toggle(&decode("seg__A__B").unwrap()).unwrap();
    r.toggle(&decode("seg__C__D").unwrap()).unwrap();
    assert_eq!(r.slot_usage(), &[2]);
    assert_eq!(r.slot_of("seg__C__D"), Some(0));
}

#[test]
fn missing_point_commits_nothing() {
    let mut r = registry();
    r.toggle(&decode("seg__A__B").unwrap()).unwrap();
    r.bridge_mut().drain_calls();
    let before = r.slot_usage().to_vec();
    let err = r.toggle(&decode("tr__A__B__Z").unwrap()).unwrap_err();
    assert_eq!(err, SelectError::MissingEntity { key: "tr__A__B__Z".into(), point: "Z".into() });
    assert_eq!(err.code(), "missing_entity");
    assert!(!r.is_selected("tr__A__B__Z"));
    assert_eq!(r.slot_usage(), &before[..]);
    assert_eq!(r.point_usage("A"), 1);
    assert!(r.bridge().calls().is_empty());
}

/// Surface that refuses the n-th overlay line.
struct Flaky {
    inner: Recorder,
    fail_at: usize,
    lines: usize,
}

impl RenderBridge for Flaky {
    fn contains_point(&self, id: &str) -> bool { self.inner.contains_point(id) }
    fn create_overlay_line(
        &mut self,
        s: &str,
        e: &str,
        k: RenderKind,
        c: Color,
    ) -> Result<OverlayHandle, BridgeError> {
        self.lines += 1;
        if self.lines == self.fail_at { return Err(BridgeError::new("board is busy")); }
        self.inner.create_overlay_line(s, e, k, c)
    }
    fn remove_overlay(&mut self, h: OverlayHandle) { self.inner.remove_overlay(h) }
    fn highlight_point(&mut self, id: &str) { self.inner.highlight_point(id) }
    fn unhighlight_point(&mut self, id: &str) { self.inner.unhighlight_point(id) }
}

#[test]
fn bridge_failure_rolls_back_partial_overlays() {
    let flaky = Flaky { inner: Recorder::new(POINTS), fail_at: 3, lines: 0 };
    let mut r = SelectionRegistry::new(flaky, Palette::default());
    let err = r.toggle(&decode("tr__A__B__C").unwrap()).unwrap_err();
    assert_eq!(err.code(), "bridge_failure");
    assert!(r.is_empty());
    assert_eq!(r.slot_usage(), &[0, 0, 0, 0, 0]);
    for p in ["A", "B", "C"] {
        assert_eq!(r.point_usage(p), 0);
        assert!(!r.bridge().inner.is_highlighted(p));
    }
    assert!(r.bridge().inner.live_overlays().is_empty());
}

#[derive(Clone, Debug, PartialEq)]
struct Snapshot {
    usage: HashMap<String, u32>,
    slots: Vec<u32>,
    overlays: Vec<OverlayHandle>,
    highlighted: Vec<String>,
    picked: Vec<String>,
}

fn snapshot(r: &SelectionRegistry<Recorder>) -> Snapshot {
    Snapshot {
        usage: POINTS.iter().map(|p| (p.to_string(), r.point_usage(p))).collect(),
        slots: r.slot_usage().to_vec(),
        overlays: r.bridge().live_overlays().iter().copied().collect(),
        highlighted: r.bridge().highlighted().map(String::from).collect(),
        picked: r.picked().to_vec(),
    }
}

fn tags() -> impl Strategy<Value = String> {
    prop_oneof![
        "pt__[A-F]",
        "seg__[A-F]__[A-F]",
        "ray__[A-F]__[A-F]",
        "tr__[A-F]__[A-F]__[A-F]",
        "ang__[A-F]__[A-F]__[A-F]",
        "plg__[A-F]__[A-F]__[A-F]__[A-F]",
        "cyc__[A-F]__[A-F]",
    ]
}

fn check_invariants(r: &SelectionRegistry<Recorder>) -> Result<(), TestCaseError> {
    for p in POINTS {
        let expected: u32 = r
            .picked()
            .iter()
            .map(|k| {
                let ids = r.entry(k).unwrap().descriptor.point_ids();
                ids.iter().filter(|q| *q == p).count() as u32
            })
            .sum();
        prop_assert_eq!(r.point_usage(p), expected);
        prop_assert_eq!(r.bridge().is_highlighted(p), expected > 0);
    }
    prop_assert_eq!(r.slot_usage().iter().sum::<u32>() as usize, r.len());
    Ok(())
}

proptest! {
    #[test]
    fn double_toggle_restores_state(
        prefix in prop::collection::vec(tags(), 0..12),
        target in tags(),
    ) {
        let mut r = registry();
        for t in &prefix {
            r.toggle(&decode(t).unwrap()).unwrap();
        }
        prop_assume!(!r.is_selected(&target));
        let before = snapshot(&r);
        let d = decode(&target).unwrap();
        r.toggle(&d).unwrap();
        r.toggle(&d).unwrap();
        prop_assert_eq!(snapshot(&r), before);
    }

    #[test]
    fn deselect_then_reselect_keeps_counts(prefix in prop::collection::vec(tags(), 1..12)) {
        let mut r = registry();
        for t in &prefix {
            r.toggle(&decode(t).unwrap()).unwrap();
        }
        prop_assume!(!r.is_empty());
        let target = r.picked()[0].clone();
        let before = snapshot(&r);
        let d = decode(&target).unwrap();
        r.toggle(&d).unwrap();
        r.toggle(&d).unwrap();
        let after = snapshot(&r);
        // fresh overlays and possibly another slot, same reference counts
        prop_assert_eq!(&after.usage, &before.usage);
        prop_assert_eq!(&after.highlighted, &before.highlighted);
        prop_assert_eq!(after.overlays.len(), before.overlays.len());
        prop_assert_eq!(after.slots.iter().sum::<u32>(), before.slots.iter().sum::<u32>());
    }

    #[test]
    fn highlight_tracks_usage(ops in prop::collection::vec(tags(), 0..30)) {
        let mut r = registry();
        for t in &ops {
            let slots = r.slot_usage().to_vec();
            let selecting = !r.is_selected(t);
            let out = r.toggle(&decode(t).unwrap()).unwrap();
            if selecting {
                let min = *slots.iter().min().unwrap();
                let first_min = slots.iter().position(|&u| u == min).unwrap();
                prop_assert!(matches!(out, Toggled::Selected { slot, .. } if slot == first_min), "expected Selected in first least-used slot");
            }
            check_invariants(&r)?;
        }
        r.clear();
        check_invariants(&r)?;
        prop_assert!(r.bridge().live_overlays().is_empty());
    }
}
