use std::collections::VecDeque;

use crate::error::Result;

use super::{BoundaryLoop, PolygonHierarchy};

/// Merges one outer ring with its direct holes into a single hole-free ring.
///
/// Contract: given one outer ring and N disjoint hole rings, all assumed
/// non-self-intersecting and contained within the outer ring (not validated
/// here), return one simple ring equivalent in area to outer-minus-holes.
pub trait EliminateHoles {
    /// Performs the merge.
    ///
    /// # Errors
    ///
    /// Returns an error if the merge cannot produce a well-formed ring.
    fn eliminate(&self, outer: &BoundaryLoop, holes: &[BoundaryLoop]) -> Result<BoundaryLoop>;
}

/// Flattens a nested polygon hierarchy into hole-free simple loops.
///
/// Breadth-first traversal over an explicit FIFO work queue, so nesting
/// depth is bounded only by memory. For each dequeued node: a node without
/// holes contributes its outer ring unchanged; a node with holes contributes
/// one merged ring from a single `eliminator` call, and every island nested
/// inside a hole is enqueued as an independent top-level entry. Output order
/// is the dequeue order.
///
/// # Errors
///
/// Returns [`ConfigurationError`](crate::error::ConfigurationError) if any
/// ring at any depth has fewer than 3 points (checked lazily as nodes are
/// dequeued), or any error from the eliminator.
pub fn flatten_hierarchy<E: EliminateHoles>(
    root: &PolygonHierarchy,
    eliminator: &E,
) -> Result<Vec<BoundaryLoop>> {
    let mut queue: VecDeque<&PolygonHierarchy> = VecDeque::new();
    queue.push_back(root);

    let mut flattened = Vec::new();
    while let Some(node) = queue.pop_front() {
        let outer = BoundaryLoop::new(node.outer().to_vec())?;
        if node.holes().is_empty() {
            flattened.push(outer);
            continue;
        }

        let mut holes = Vec::with_capacity(node.holes().len());
        for hole in node.holes() {
            holes.push(BoundaryLoop::new(hole.outer().to_vec())?);
            for island in hole.holes() {
                queue.push_back(island);
            }
        }
        flattened.push(eliminator.eliminate(&outer, &holes)?);
    }
    Ok(flattened)
}
