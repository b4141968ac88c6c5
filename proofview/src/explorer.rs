use crate::bridge::RenderBridge;
use crate::codec::{decode, DecodeError};
use crate::config::Palette;
use crate::registry::{SelectError, SelectionRegistry, Toggled};
use crate::tree::{NodeId, ProofTree, TreeError};
use crate::visibility::{compute_visibility, Visibility};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Toggled(Toggled),
    /// The tag could not be decoded; nothing changed.
    Skipped(DecodeError),
}

/// Interaction entry points of the proof view: figure clicks, row toggles,
/// and the essential-only filter.
pub struct Explorer<B> {
    registry: SelectionRegistry<B>,
    tree: ProofTree,
    hide_non_essential: bool,
    visibility: Visibility,
}

impl<B: RenderBridge> Explorer<B> {
    pub fn new(bridge: B, palette: Palette, tree: ProofTree) -> Self {
        let visibility = compute_visibility(&tree, false);
        Explorer {
            registry: SelectionRegistry::new(bridge, palette),
            tree,
            hide_non_essential: false,
            visibility,
        }
    }

    pub fn registry(&self) -> &SelectionRegistry<B> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SelectionRegistry<B> {
        &mut self.registry
    }

    pub fn tree(&self) -> &ProofTree {
        &self.tree
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn hides_non_essential(&self) -> bool {
        self.hide_non_essential
    }

    pub fn entity_clicked(&mut self, tag: &str) -> Result<ClickOutcome, SelectError> {
        match decode(tag) {
            Ok(d) => self.registry.toggle(&d).map(ClickOutcome::Toggled),
            Err(e) => {
                log::warn!("ignoring figure '{}': {}", tag, e);
                Ok(ClickOutcome::Skipped(e))
            }
        }
    }

    pub fn node_toggled(&mut self, id: NodeId) -> Result<bool, TreeError> {
        self.tree.toggle(id)
    }

    pub fn node_toggled_propagate(
        &mut self,
        id: NodeId,
        propagate: bool,
    ) -> Result<bool, TreeError> {
        if propagate {
            self.tree.toggle_propagate(id)
        } else {
            self.tree.toggle(id)
        }
    }

    pub fn essential_filter_toggled(&mut self, hide: bool) -> &Visibility {
        self.hide_non_essential = hide;
        self.visibility = compute_visibility(&self.tree, hide);
        &self.visibility
    }

    /// Rows whose text references at least one selected figure.
    pub fn selected_nodes(&self) -> Vec<NodeId> {
        (0..self.tree.len())
            .filter(|&id| self.tree.figures(id).iter().any(|k| self.registry.is_selected(k)))
            .collect()
    }
}
