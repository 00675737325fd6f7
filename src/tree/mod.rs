mod build;

use crate::math::SpatialVector;
use crate::volume::Aabb;

/// Index of a node in a hierarchy.
pub type NodeId = u32;

/// Rope value marking the end of the depth-first chain. The traversal kernels
/// also use it as the bottom marker of their node stacks.
pub const SENTINEL: NodeId = NodeId::MAX;

/// Read-only contract between the traversal kernels and a hierarchy.
///
/// Node identifiers are stable for the duration of a traversal, and the
/// volume of an internal node contains the volumes of both its children.
/// Subtree pruning relies on this containment; hierarchies violating it
/// produce unspecified results.
pub trait Hierarchy {
    /// Bounding volume stored at each node.
    type Volume;

    /// Number of leaves.
    fn leaf_count(&self) -> usize;

    /// Returns true if the hierarchy holds no leaves.
    #[inline]
    fn is_empty(&self) -> bool {
        self.leaf_count() == 0
    }

    /// Identifier of the root node.
    fn root(&self) -> NodeId;

    /// Bounding volume of `node`.
    fn bounds(&self, node: NodeId) -> Self::Volume;

    /// Returns true if `node` is a leaf.
    fn is_leaf(&self, node: NodeId) -> bool;

    /// Left child of the internal node `node`.
    fn left_child(&self, node: NodeId) -> NodeId;

    /// Original caller-space index of the primitive stored at the leaf `node`.
    fn leaf_index(&self, node: NodeId) -> u32;
}

/// Hierarchy whose internal nodes store both child links.
///
/// Nodes are packed with the `n - 1` internal nodes first and the `n` leaves
/// after them, so leaf-ness is index arithmetic rather than a stored flag.
/// The root is node `0`.
#[derive(Clone, Debug)]
pub struct TwoChildTree<V> {
    pub(crate) bounds: Vec<Aabb<V>>,
    pub(crate) children: Vec<(NodeId, NodeId)>,
    pub(crate) permutation: Vec<u32>,
}

impl<V: SpatialVector> TwoChildTree<V> {
    /// Builds a hierarchy over the given leaf volumes.
    ///
    /// The leaf holding `leaves[i]` keeps `i` as its
    /// [leaf index](Hierarchy::leaf_index).
    pub fn from_leaves(leaves: &[Aabb<V>]) -> Self {
        let built = build::median_split(leaves);
        Self {
            bounds: built.bounds,
            children: built.children,
            permutation: built.permutation,
        }
    }
}

impl<V: SpatialVector> Hierarchy for TwoChildTree<V> {
    type Volume = Aabb<V>;

    #[inline]
    fn leaf_count(&self) -> usize {
        self.permutation.len()
    }

    #[inline]
    fn root(&self) -> NodeId {
        0
    }

    #[inline]
    fn bounds(&self, node: NodeId) -> Aabb<V> {
        self.bounds[node as usize]
    }

    #[inline]
    fn is_leaf(&self, node: NodeId) -> bool {
        node as usize >= self.children.len()
    }

    #[inline]
    fn left_child(&self, node: NodeId) -> NodeId {
        self.children[node as usize].0
    }

    #[inline]
    fn leaf_index(&self, node: NodeId) -> u32 {
        self.permutation[node as usize - self.children.len()]
    }
}

/// Hierarchy whose nodes store a left child link and a rope.
///
/// The rope of a node points to the next node to visit when the node's
/// subtree is skipped: its right sibling, or the right sibling of the nearest
/// ancestor that has one, with [`SENTINEL`] at the end of the depth-first
/// order. The right member of an internal node's child pair is recovered as
/// the rope of its left child.
///
/// Uses the same packed id space as [`TwoChildTree`].
#[derive(Clone, Debug)]
pub struct RopeTree<V> {
    pub(crate) bounds: Vec<Aabb<V>>,
    pub(crate) left: Vec<NodeId>,
    pub(crate) ropes: Vec<NodeId>,
    pub(crate) permutation: Vec<u32>,
}

impl<V: SpatialVector> RopeTree<V> {
    /// Builds a hierarchy over the given leaf volumes.
    ///
    /// The leaf holding `leaves[i]` keeps `i` as its
    /// [leaf index](Hierarchy::leaf_index).
    pub fn from_leaves(leaves: &[Aabb<V>]) -> Self {
        let built = build::median_split(leaves);

        let mut ropes = vec![SENTINEL; built.bounds.len()];
        if !built.children.is_empty() {
            let mut pending = vec![(0 as NodeId, SENTINEL)];
            while let Some((node, skip)) = pending.pop() {
                ropes[node as usize] = skip;
                if (node as usize) < built.children.len() {
                    let (left, right) = built.children[node as usize];
                    pending.push((left, right));
                    pending.push((right, skip));
                }
            }
        }

        Self {
            bounds: built.bounds,
            left: built.children.iter().map(|&(left, _)| left).collect(),
            ropes,
            permutation: built.permutation,
        }
    }

    /// Next node to visit when the subtree of `node` is skipped, or
    /// [`SENTINEL`] at the end of the depth-first order.
    #[inline]
    pub fn rope(&self, node: NodeId) -> NodeId {
        self.ropes[node as usize]
    }
}

impl<V: SpatialVector> Hierarchy for RopeTree<V> {
    type Volume = Aabb<V>;

    #[inline]
    fn leaf_count(&self) -> usize {
        self.permutation.len()
    }

    #[inline]
    fn root(&self) -> NodeId {
        0
    }

    #[inline]
    fn bounds(&self, node: NodeId) -> Aabb<V> {
        self.bounds[node as usize]
    }

    #[inline]
    fn is_leaf(&self, node: NodeId) -> bool {
        node as usize >= self.left.len()
    }

    #[inline]
    fn left_child(&self, node: NodeId) -> NodeId {
        self.left[node as usize]
    }

    #[inline]
    fn leaf_index(&self, node: NodeId) -> u32 {
        self.permutation[node as usize - self.left.len()]
    }
}
