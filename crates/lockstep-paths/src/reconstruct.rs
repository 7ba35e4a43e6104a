use lockstep_core::Path;

use crate::search::{NodeId, SearchNode};

/// Follow parent links from `terminal` back to the root node and return the
/// positions in root-to-terminal order.
pub fn reconstruct(nodes: &[SearchNode], terminal: NodeId) -> Path {
    let mut positions = Vec::new();
    let mut cursor = Some(terminal);
    while let Some(id) = cursor {
        let node = &nodes[id.index()];
        positions.push(node.pos);
        cursor = node.parent;
    }
    positions.reverse();
    Path::from(positions)
}
