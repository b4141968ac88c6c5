use crate::tree::{NodeId, ProofTree};
use serde::Serialize;

/// Row display state per node id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Visibility {
    pub visible: Vec<bool>,
    /// Branch rows with no visible child; presentational only.
    pub empty: Vec<bool>,
}

impl Visibility {
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.visible.get(id).copied().unwrap_or(false)
    }

    pub fn is_empty_branch(&self, id: NodeId) -> bool {
        self.empty.get(id).copied().unwrap_or(false)
    }

    pub fn hidden(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.visible.iter().enumerate().filter(|(_, v)| !**v).map(|(i, _)| i)
    }
}

pub fn is_essential(tree: &ProofTree, id: NodeId) -> bool {
    match (tree.node(id), tree.max_priority()) {
        (Some(n), Some(max)) => n.priority == max,
        _ => false,
    }
}

pub fn compute_visibility(tree: &ProofTree, hide_non_essential: bool) -> Visibility {
    let n = tree.len();
    let mut visible = vec![true; n];
    if hide_non_essential {
        let max = tree.max_priority().unwrap_or(0);
        // Pre-order ids: every child has a larger id than its parent.
        for id in (0..n).rev() {
            let node = &tree.nodes()[id];
            visible[id] = node.priority == max || node.children.iter().any(|&c| visible[c]);
        }
    }
    let empty = (0..n)
        .map(|id| {
            let children = tree.children(id);
            !children.is_empty() && children.iter().all(|&c| !visible[c])
        })
        .collect();
    Visibility { visible, empty }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ProofStep;

    fn tree(rows: &[(i64, Vec<usize>)]) -> ProofTree {
        let steps: Vec<ProofStep> = rows
            .iter()
            .map(|(p, prem)| ProofStep {
                property: String::new(),
                comment: String::new(),
                priority: *p,
                premises: prem.clone(),
            })
            .collect();
        ProofTree::from_steps(&steps).unwrap()
    }

    #[test]
    fn unfiltered_shows_everything() {
        let t = tree(&[(3, vec![1]), (1, vec![])]);
        let v = compute_visibility(&t, false);
        assert_eq!(v.visible, vec![true, true]);
        assert_eq!(v.empty, vec![false, false]);
    }

    #[test]
    fn ancestors_of_essential_rows_stay() {
        // 0(1) -> 1(1) -> 2(5); 0 -> 3(1)
        let t = tree(&[(1, vec![1, 3]), (1, vec![2]), (5, vec![]), (1, vec![])]);
        let v = compute_visibility(&t, true);
        assert_eq!(v.visible, vec![true, true, true, false]);
        assert!(!v.is_empty_branch(0));
        assert_eq!(v.hidden().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn branch_with_only_hidden_children_is_empty() {
        let t = tree(&[(2, vec![1]), (1, vec![])]);
        let v = compute_visibility(&t, true);
        assert_eq!(v.visible, vec![true, false]);
        assert!(v.is_empty_branch(0));
        assert!(is_essential(&t, 0));
        assert!(!is_essential(&t, 1));
    }

    #[test]
    fn empty_tree() {
        let v = compute_visibility(&ProofTree::default(), true);
        assert!(v.visible.is_empty());
    }
}
