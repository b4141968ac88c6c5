use proofview::visibility::is_essential;
use proofview::{compute_visibility, ProofStep, ProofTree};
use proptest::prelude::*;

fn step(priority: i64, premises: &[usize]) -> ProofStep {
    ProofStep {
        property: format!("prio {}", priority),
        comment: String::new(),
        priority,
        premises: premises.to_vec(),
    }
}

#[test]
fn five_rows_keep_top_priority_and_ancestors() {
    // 0(3) -> 1(3) -> {2(1), 3(1)}; 0 -> 4(2)
    let steps = vec![step(3, &[1, 4]), step(3, &[2, 3]), step(1, &[]), step(1, &[]), step(2, &[])];
    let t = ProofTree::from_steps(&steps).unwrap();
    let prios: Vec<i64> = t.nodes().iter().map(|n| n.priority).collect();
    assert_eq!(prios, vec![3, 3, 1, 1, 2]);

    let v = compute_visibility(&t, true);
    assert_eq!(v.visible, vec![true, true, false, false, false]);
    assert_eq!(v.hidden().collect::<Vec<_>>(), vec![2, 3, 4]);
    assert!(v.is_empty_branch(1));
    assert!(!v.is_empty_branch(0));

    let all = compute_visibility(&t, false);
    assert!(all.visible.iter().all(|&b| b));
    assert!(all.empty.iter().all(|&b| !b));
}

#[test]
fn low_priority_root_survives_through_its_chain() {
    // 0(1) -> 1(0) -> 2(4); 0 -> 3(2)
    let steps = vec![step(1, &[1, 3]), step(0, &[2]), step(4, &[]), step(2, &[])];
    let t = ProofTree::from_steps(&steps).unwrap();
    let v = compute_visibility(&t, true);
    assert_eq!(v.visible, vec![true, true, true, false]);
}

#[test]
fn empty_tree_has_no_rows() {
    let t = ProofTree::from_steps(&[]).unwrap();
    let v = compute_visibility(&t, true);
    assert!(v.visible.is_empty());
    assert_eq!(t.max_priority(), None);
}

/// Random trees where step `i` is a premise of some earlier step.
fn steps() -> impl Strategy<Value = Vec<ProofStep>> {
    prop::collection::vec((0i64..4, any::<prop::sample::Index>()), 1..40).prop_map(|shape| {
        let mut out: Vec<ProofStep> = shape.iter().map(|(p, _)| step(*p, &[])).collect();
        for (i, (_, parent)) in shape.iter().enumerate().skip(1) {
            let p = parent.index(i);
            out[p].premises.push(i);
        }
        out
    })
}

proptest! {
    #[test]
    fn visible_iff_essential_or_has_visible_child(steps in steps()) {
        let t = ProofTree::from_steps(&steps).unwrap();
        prop_assert_eq!(t.len(), steps.len());
        let v = compute_visibility(&t, true);
        for id in 0..t.len() {
            let expected = is_essential(&t, id) || t.children(id).iter().any(|&c| v.is_visible(c));
            prop_assert_eq!(v.is_visible(id), expected);
            if is_essential(&t, id) {
                let mut up = t.parent(id);
                while let Some(a) = up {
                    prop_assert!(v.is_visible(a));
                    up = t.parent(a);
                }
            }
        }
        prop_assert!(v.is_visible(0));
    }
}
