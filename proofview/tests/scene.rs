use proofview::scene::Circle;
use proofview::{steps_from_json_value, IngestError, ProofTree, Recorder, RenderBridge, Scene};
use serde_json::json;

fn close(a: [f64; 4], b: [f64; 4]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-9)
}

fn triangle() -> serde_json::Value {
    json!({
        "points": [
            { "name": "A", "x": 0.0, "y": 0.0 },
            { "name": "B", "x": 4.0, "y": 0.0 },
            { "name": "C", "x": 0.0, "y": 2.0 }
        ],
        "lines": [{ "pt0": "A", "pt1": "B" }],
        "circles": [{ "centre": "A", "pt": "B" }]
    })
}

#[test]
fn loads_points_lines_and_circles() {
    let s = Scene::from_json_value(triangle()).unwrap();
    assert_eq!(s.point_names().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    assert_eq!(s.lines.len(), 1);
    assert_eq!(s.circles, vec![Circle::Through { centre: "A".into(), pt: "B".into() }]);
    assert_eq!(Scene::from_json_value_strict(triangle()).unwrap(), s);
}

#[test]
fn viewport_is_a_padded_square_over_points() {
    let s = Scene::from_json_value(json!({
        "points": [
            { "name": "A", "x": 0.0, "y": 0.0 },
            { "name": "B", "x": 4.0, "y": 0.0 },
            { "name": "C", "x": 0.0, "y": 2.0 }
        ]
    }))
    .unwrap();
    assert!(close(s.viewport().unwrap(), [-0.6, -1.6, 4.6, 3.6]));
}

#[test]
fn viewport_covers_circles() {
    let s = Scene::from_json_value(triangle()).unwrap();
    // circle of radius 4 around A spans [-4, 4] on both axes
    assert!(close(s.viewport().unwrap(), [-5.2, -5.2, 5.2, 5.2]));
    assert_eq!(Scene::default().viewport(), None);
}

#[test]
fn lone_or_coincident_points_get_a_minimum_viewport() {
    let one = Scene::from_json_value(json!({ "points": [{ "name": "A", "x": 2.0, "y": 3.0 }] }))
        .unwrap();
    assert!(close(one.viewport().unwrap(), [1.35, 2.35, 2.65, 3.65]));

    let stacked = Scene::from_json_value(json!({
        "points": [{ "name": "A", "x": 2.0, "y": 3.0 }, { "name": "B", "x": 2.0, "y": 3.0 }]
    }))
    .unwrap();
    assert_eq!(stacked.viewport(), one.viewport());
}

#[test]
fn lenient_load_drops_what_cannot_be_drawn() {
    let s = Scene::from_json_value(json!({
        "points": [
            { "name": "A", "x": 0.0, "y": 0.0 },
            { "name": "A", "x": 1.0, "y": 1.0 },
            { "name": "F", "x": 1e9, "y": 0.0 }
        ],
        "lines": [{ "pt0": "A", "pt1": "Q" }],
        "circles": [{ "x": 0.0, "y": 0.0, "radius": -1.0 }]
    }))
    .unwrap();
    assert_eq!(s.points.len(), 1);
    assert_eq!(s.point("A").unwrap().x, 0.0);
    assert!(s.lines.is_empty());
    assert!(s.circles.is_empty());
}

#[test]
fn strict_load_reports_the_first_problem() {
    let dup = json!({
        "points": [{ "name": "A", "x": 0, "y": 0 }, { "name": "A", "x": 1, "y": 1 }]
    });
    let err = Scene::from_json_value_strict(dup).unwrap_err();
    assert_eq!(err, IngestError::DuplicatePoint { name: "A".into() });
    assert_eq!(err.code(), "duplicate_point");

    let far = json!({ "points": [{ "name": "F", "x": 1e9, "y": 0 }] });
    assert_eq!(Scene::from_json_value_strict(far).unwrap_err().code(), "non_finite");

    let dangling = json!({
        "points": [{ "name": "A", "x": 0, "y": 0 }],
        "lines": [{ "pt0": "A", "pt1": "Z" }]
    });
    assert_eq!(
        Scene::from_json_value_strict(dangling).unwrap_err(),
        IngestError::UnknownPoint { name: "Z".into() }
    );

    let bad = json!({ "points": 3 });
    assert_eq!(Scene::from_json_value_strict(bad).unwrap_err().code(), "invalid_json");
}

#[test]
fn recorder_knows_scene_points() {
    let s = Scene::from_json_value(triangle()).unwrap();
    let r = Recorder::from_scene(&s);
    assert!(r.contains_point("C"));
    assert!(!r.contains_point("D"));
}

#[test]
fn proof_steps_parse_with_defaults() {
    let v = json!([
        {
            "property": "<span class=\"figure tr__A__B__C\"></span> is isosceles",
            "priority": 3,
            "premises": [1]
        },
        { "property": "AB = AC" }
    ]);
    let steps = steps_from_json_value(v.clone()).unwrap();
    assert_eq!(steps[1].priority, 0);
    assert!(steps[1].premises.is_empty());
    let t = ProofTree::from_json_value(v).unwrap();
    assert_eq!(t.figures(0), vec!["tr__A__B__C".to_string()]);
}

#[test]
fn bad_premises_are_rejected() {
    let missing = json!([{ "property": "x", "premises": [7] }]);
    assert_eq!(
        ProofTree::from_json_value(missing).unwrap_err(),
        IngestError::InvalidPremise { step: 0, premise: 7 }
    );
    let cycle = json!([{ "property": "x", "premises": [1] }, { "property": "y", "premises": [0] }]);
    assert_eq!(ProofTree::from_json_value(cycle).unwrap_err().code(), "premise_cycle");
}
