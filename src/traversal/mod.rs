/// Bounded max-heap backing the nearest kernel.
pub mod heap;
/// Best-first nearest kernel and scratch provisioning.
pub mod nearest;
/// Per-encoding spatial kernels.
mod spatial;

use crate::execution::Execution;
use crate::predicate::{NearestPredicate, NearestTag, Predicate, SpatialPredicate, SpatialTag};
use crate::tree::{Hierarchy, NodeId};

/// Depth capacity of the per-query traversal stacks.
///
/// Covers any balanced or near-balanced hierarchy of up to 2^64 leaves;
/// deeper hierarchies are out of contract.
pub const STACK_DEPTH: usize = 64;

/// Hierarchy supporting the per-query descent kernels.
///
/// Implemented once per node encoding: [`TwoChildTree`](crate::tree::TwoChildTree)
/// descends with an explicit stack, [`RopeTree`](crate::tree::RopeTree)
/// follows ropes and keeps no stack at all.
pub trait Traversable: Hierarchy {
    /// Right member of the internal node `node`'s child pair.
    fn right_child(&self, node: NodeId) -> NodeId;

    /// Invokes `hit` with the leaf index of every leaf whose volume satisfies
    /// `predicate`, in unspecified order.
    ///
    /// One-query spatial kernel; the hierarchy must hold at least two leaves.
    fn for_each_overlap<P, F>(&self, predicate: &P, hit: F)
    where
        P: SpatialPredicate<Self::Volume>,
        F: FnMut(u32);
}

/// Runs every predicate of the batch against the hierarchy and reports hits
/// to `callback`, one independent task per predicate.
///
/// The kernel is selected at compile time by the predicate tag. Spatial
/// predicates report `(predicate, leaf_index)` for every satisfying leaf, in
/// unspecified order. Nearest predicates report
/// `(predicate, leaf_index, distance)` for the `min(k, leaf_count)` closest
/// leaves, in nondecreasing distance order within the query. An empty
/// hierarchy, an empty batch, or a nearest predicate with `k == 0` report
/// nothing.
///
/// The callback may be invoked concurrently from distinct tasks; aggregation
/// per query is the caller's concern.
///
/// # Example
///
/// ```
/// # use canopy::prelude::*;
/// # use canopy::math::Vec2;
/// let tree = TwoChildTree::from_leaves(&[
///     Aabb::point(Vec2::new(0.0, 0.0)),
///     Aabb::point(Vec2::new(1.0, 0.0)),
///     Aabb::point(Vec2::new(5.0, 5.0)),
/// ]);
/// let batch = [Overlaps(Aabb::new(Vec2::new(-1.0, -1.0), Vec2::new(2.0, 2.0)))];
///
/// let hits = std::sync::Mutex::new(Vec::new());
/// traverse(&mut Sequential, &tree, &batch, &|_, leaf| {
///     hits.lock().unwrap().push(leaf);
/// });
///
/// let mut hits = hits.into_inner().unwrap();
/// hits.sort_unstable();
/// assert_eq!(hits, vec![0, 1]);
/// ```
pub fn traverse<E, T, P, C>(execution: &mut E, tree: &T, predicates: &[P], callback: &C)
where
    E: Execution,
    T: Traversable,
    P: Predicate,
    P::Tag: Launch<E, T, P, C>,
{
    <P::Tag as Launch<E, T, P, C>>::launch(execution, tree, predicates, callback);
}

/// Batch launcher selected by the predicate tag.
///
/// Implemented for [`SpatialTag`] and [`NearestTag`]; downstream predicates
/// pick a kernel by choosing one of the two tags.
pub trait Launch<E, T, P, C> {
    /// Launches one task per predicate of the batch.
    fn launch(execution: &mut E, tree: &T, predicates: &[P], callback: &C);
}

impl<E, T, P, C> Launch<E, T, P, C> for SpatialTag
where
    E: Execution,
    T: Traversable + Sync,
    P: SpatialPredicate<T::Volume> + Sync,
    C: Fn(&P, u32) + Sync,
{
    fn launch(execution: &mut E, tree: &T, predicates: &[P], callback: &C) {
        if tree.is_empty() {
            return;
        }

        if tree.leaf_count() == 1 {
            // Degenerate hierarchy: the root is the only leaf.
            let root = tree.root();
            execution.for_each(predicates.len(), |index| {
                let predicate = &predicates[index];
                if predicate.test(&tree.bounds(root)) {
                    callback(predicate, tree.leaf_index(root));
                }
            });
        } else {
            execution.for_each(predicates.len(), |index| {
                let predicate = &predicates[index];
                tree.for_each_overlap(predicate, |leaf| callback(predicate, leaf));
            });
        }
    }
}

impl<E, T, P, C> Launch<E, T, P, C> for NearestTag
where
    E: Execution,
    T: Traversable + Sync,
    P: NearestPredicate<T::Volume> + Sync,
    P::Scalar: Send + Sync,
    C: Fn(&P, u32, P::Scalar) + Sync,
{
    fn launch(execution: &mut E, tree: &T, predicates: &[P], callback: &C) {
        if tree.is_empty() {
            return;
        }

        if tree.leaf_count() == 1 {
            // Degenerate hierarchy: the root is the only leaf.
            let root = tree.root();
            execution.for_each(predicates.len(), |index| {
                let predicate = &predicates[index];
                if predicate.k() >= 1 {
                    callback(
                        predicate,
                        tree.leaf_index(root),
                        predicate.distance(&tree.bounds(root)),
                    );
                }
            });
        } else {
            let mut scratch: nearest::ScratchBuffer<P::Scalar> =
                nearest::ScratchBuffer::provision(predicates.iter().map(|predicate| predicate.k()));
            execution.for_each_view(scratch.views(), |index, view| {
                let predicate = &predicates[index];
                nearest::search(tree, predicate, view, |leaf, distance| {
                    callback(predicate, leaf, distance);
                });
            });
        }
    }
}
