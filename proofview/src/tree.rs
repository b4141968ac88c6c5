use crate::json::IngestError;
use crate::limits;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type NodeId = usize;

/// One entry of a proof description; `premises` index into the same list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    pub property: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub premises: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub id: NodeId,
    pub property_text: String,
    pub comment_text: String,
    pub priority: i64,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    /// Index of the proof step this row was unfolded from.
    pub step: usize,
    pub(crate) is_open: bool,
}

impl TreeNode {
    pub fn is_branch(&self) -> bool {
        !self.children.is_empty()
    }
    pub fn is_open(&self) -> bool {
        self.is_open
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeError {
    UnknownNode(NodeId),
}

impl TreeError {
    pub fn code(&self) -> &'static str {
        match self {
            TreeError::UnknownNode(_) => "unknown_node",
        }
    }
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::UnknownNode(id) => write!(f, "no tree node {}", id),
        }
    }
}

impl std::error::Error for TreeError {}

enum Frame {
    Enter { step: usize, parent: Option<NodeId> },
    Exit { step: usize },
}

/// Justification tree unfolded from proof steps. Node ids are pre-order
/// positions; node 0 is the conclusion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProofTree {
    nodes: Vec<TreeNode>,
}

impl ProofTree {
    /// Unfolds the premise graph from step 0. A step used by several parents
    /// appears once under each of them.
    pub fn from_steps(steps: &[ProofStep]) -> Result<ProofTree, IngestError> {
        if steps.len() > limits::MAX_PROOF_STEPS {
            return Err(IngestError::CapsExceeded { what: "steps", max: limits::MAX_PROOF_STEPS });
        }
        let mut nodes: Vec<TreeNode> = Vec::new();
        if steps.is_empty() {
            return Ok(ProofTree { nodes });
        }
        // steps on the path from the root to the node being entered
        let mut on_path = vec![false; steps.len()];
        let mut pending = 1;
        let mut stack = vec![Frame::Enter { step: 0, parent: None }];
        while let Some(frame) = stack.pop() {
            let (step, parent) = match frame {
                Frame::Exit { step } => {
                    on_path[step] = false;
                    continue;
                }
                Frame::Enter { step, parent } => (step, parent),
            };
            pending -= 1;
            if on_path[step] {
                return Err(IngestError::PremiseCycle { step });
            }
            let s = &steps[step];
            if nodes.len() + 1 + pending + s.premises.len() > limits::MAX_TREE_NODES {
                let max = limits::MAX_TREE_NODES;
                return Err(IngestError::CapsExceeded { what: "tree nodes", max });
            }
            let id = nodes.len();
            nodes.push(TreeNode {
                id,
                property_text: s.property.clone(),
                comment_text: s.comment.clone(),
                priority: s.priority,
                children: Vec::new(),
                parent,
                step,
                is_open: false,
            });
            if let Some(p) = parent {
                nodes[p].children.push(id);
            }
            on_path[step] = true;
            stack.push(Frame::Exit { step });
            for &premise in s.premises.iter().rev() {
                if premise >= steps.len() {
                    return Err(IngestError::InvalidPremise { step, premise });
                }
                stack.push(Frame::Enter { step: premise, parent: Some(id) });
                pending += 1;
            }
        }
        log::debug!("proof tree unfolded: {} steps -> {} nodes", steps.len(), nodes.len());
        Ok(ProofTree { nodes })
    }

    pub fn from_json_value(v: serde_json::Value) -> Result<ProofTree, IngestError> {
        crate::json::tree_from_json_impl(v)
    }

    pub fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() { None } else { Some(0) }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Strict descendants in pre-order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    /// Proof step a row was unfolded from.
    pub fn step_index(&self, id: NodeId) -> Option<usize> {
        self.nodes.get(id).map(|n| n.step)
    }

    pub fn max_priority(&self) -> Option<i64> {
        self.nodes.iter().map(|n| n.priority).max()
    }

    pub fn is_open(&self, id: NodeId) -> bool {
        self.nodes.get(id).map_or(false, |n| n.is_open)
    }

    fn check(&self, id: NodeId) -> Result<(), TreeError> {
        if id < self.nodes.len() { Ok(()) } else { Err(TreeError::UnknownNode(id)) }
    }

    /// Flips a single branch node. Leaves stay closed. Returns the new state.
    pub fn toggle(&mut self, id: NodeId) -> Result<bool, TreeError> {
        self.check(id)?;
        let n = &mut self.nodes[id];
        if n.children.is_empty() {
            return Ok(false);
        }
        n.is_open = !n.is_open;
        log::trace!("node {} {}", id, if n.is_open { "opened" } else { "closed" });
        Ok(n.is_open)
    }

    /// Opens every closed descendant when `id` is closed, closes every open
    /// one when it is open, then flips `id`.
    pub fn toggle_propagate(&mut self, id: NodeId) -> Result<bool, TreeError> {
        self.check(id)?;
        if self.nodes[id].children.is_empty() {
            return Ok(false);
        }
        let target = !self.nodes[id].is_open;
        for d in self.descendants(id) {
            let n = &mut self.nodes[d];
            if n.is_branch() {
                n.is_open = target;
            }
        }
        self.toggle(id)
    }

    /// Figure tags referenced by a row's property and comment text.
    pub fn figures(&self, id: NodeId) -> Vec<String> {
        let Some(n) = self.nodes.get(id) else { return Vec::new() };
        let mut out: Vec<String> = Vec::new();
        for text in [&n.property_text, &n.comment_text] {
            for tag in figure_tags(text) {
                if !out.iter().any(|t| t == tag) {
                    out.push(tag.to_string());
                }
            }
        }
        out
    }
}

/// Tokens of `text` that decode as figure tags, e.g. the class list of
/// `<span class="figure tr__A__B__C"></span>`.
pub fn figure_tags(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|t| t.contains(crate::codec::SEPARATOR))
        .filter(|t| crate::codec::decode(t).is_ok())
}
