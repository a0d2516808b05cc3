//! Ownership index recording which component claimed each scene node.

use crate::model::ComponentId;
use sketch_core::{NodeId, SceneGraph};

/// Per-run map from scene node to the component that claimed it.
///
/// A node is claimed at most once; later claims never overwrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimIndex {
    owners: Vec<Option<ComponentId>>,
}

impl ClaimIndex {
    /// Index for a graph of `len` nodes, all unclaimed.
    pub fn new(len: usize) -> Self {
        Self {
            owners: vec![None; len],
        }
    }

    pub fn owner(&self, node: NodeId) -> Option<ComponentId> {
        self.owners.get(node.index()).copied().flatten()
    }

    pub fn is_claimed(&self, node: NodeId) -> bool {
        self.owner(node).is_some()
    }

    /// Claim a single node. Returns the existing owner if it was taken.
    pub fn claim(&mut self, node: NodeId, component: ComponentId) -> Result<(), ComponentId> {
        match self.owners.get_mut(node.index()) {
            Some(Some(existing)) => Err(*existing),
            Some(slot) => {
                *slot = Some(component);
                Ok(())
            }
            // Out-of-range ids never come from the reader; treat as owned by nobody.
            None => Ok(()),
        }
    }

    /// Claim `root` and every unclaimed descendant. Returns the nodes that
    /// were newly claimed, in document order.
    pub fn claim_subtree(
        &mut self,
        graph: &SceneGraph,
        root: NodeId,
        component: ComponentId,
    ) -> Vec<NodeId> {
        std::iter::once(root)
            .chain(graph.descendants(root).iter().map(|n| n.id))
            .filter(|id| self.claim(*id, component).is_ok())
            .collect()
    }

    /// Number of claimed nodes.
    pub fn claimed_count(&self) -> usize {
        self.owners.iter().filter(|o| o.is_some()).count()
    }

    /// Nodes nobody claimed, in document order.
    pub fn unclaimed(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.owners
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_none())
            .map(|(i, _)| NodeId(i as u32))
    }
}
