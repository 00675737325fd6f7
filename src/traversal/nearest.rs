use crate::math::{Infinity, Zero};
use crate::predicate::NearestPredicate;
use crate::traversal::{
    heap::{BoundedHeap, Candidate},
    Traversable, STACK_DEPTH,
};
use crate::tree::SENTINEL;

/// One-query best-first descent: finds the `predicate.k()` leaves closest to
/// the predicate's geometry and reports them through `hit` in nondecreasing
/// distance order.
///
/// `scratch` must hold exactly `k` entries; it backs the candidate heap and
/// is left sorted by distance on return. The hierarchy must hold at least two
/// leaves. Returns the number of reported leaves,
/// `min(k, tree.leaf_count())`, zero when `k == 0`.
///
/// Subtrees farther than the current k-th candidate cannot improve the
/// result and are discarded; the radius starts at infinity and tightens once
/// `k` candidates are held.
pub fn search<T, P, F>(
    tree: &T,
    predicate: &P,
    scratch: &mut [Candidate<P::Scalar>],
    mut hit: F,
) -> usize
where
    T: Traversable,
    P: NearestPredicate<T::Volume>,
    F: FnMut(u32, P::Scalar),
{
    let k = predicate.k();
    if k == 0 {
        return 0;
    }
    debug_assert_eq!(scratch.len(), k);

    let mut radius = P::Scalar::infinity();
    let mut heap = BoundedHeap::new(scratch);

    // Deferred siblings and the distance they were deferred with, so a
    // branch whose distance no longer beats the radius is dropped on pop
    // without recomputing anything.
    let mut stack = [(SENTINEL, P::Scalar::ZERO); STACK_DEPTH];
    let mut top = 1;

    let mut node = tree.root();
    let mut node_distance = P::Scalar::ZERO;
    let mut left = node;
    let mut right = node;
    let mut distance_left = P::Scalar::ZERO;
    let mut distance_right = P::Scalar::ZERO;

    loop {
        let mut descend_left = false;
        let mut descend_right = false;

        if node_distance < radius {
            left = tree.left_child(node);
            right = tree.right_child(node);

            distance_left = predicate.distance(&tree.bounds(left));
            distance_right = predicate.distance(&tree.bounds(right));

            if distance_left < radius && tree.is_leaf(left) {
                let candidate = Candidate {
                    leaf: tree.leaf_index(left),
                    distance: distance_left,
                };
                if heap.is_full() {
                    heap.replace_top(candidate);
                } else {
                    heap.push(candidate);
                }
                if heap.len() == k {
                    radius = heap.top().distance;
                }
            }
            // The left candidate may already have tightened the radius.
            if distance_right < radius && tree.is_leaf(right) {
                let candidate = Candidate {
                    leaf: tree.leaf_index(right),
                    distance: distance_right,
                };
                if heap.is_full() {
                    heap.replace_top(candidate);
                } else {
                    heap.push(candidate);
                }
                if heap.len() == k {
                    radius = heap.top().distance;
                }
            }

            descend_left = distance_left < radius && !tree.is_leaf(left);
            descend_right = distance_right < radius && !tree.is_leaf(right);
        }

        if !descend_left && !descend_right {
            top -= 1;
            let (deferred, deferred_distance) = stack[top];
            if deferred == SENTINEL {
                break;
            }
            node = deferred;
            node_distance = deferred_distance;
        } else {
            // Descend the nearer child first, ties toward the left; defer
            // the other when both qualify.
            let toward_left = descend_left && (distance_left <= distance_right || !descend_right);
            node = if toward_left { left } else { right };
            node_distance = if toward_left {
                distance_left
            } else {
                distance_right
            };
            if descend_left && descend_right {
                debug_assert!(top < STACK_DEPTH);
                stack[top] = if toward_left {
                    (right, distance_right)
                } else {
                    (left, distance_left)
                };
                top += 1;
            }
        }
    }

    // Sorting breaks the heap structure, which is fine: the heap is done.
    let found = heap.len();
    let results = &mut scratch[..found];
    results.sort_unstable_by(|a, b| match a.distance.partial_cmp(&b.distance) {
        Some(ordering) => ordering,
        None => std::cmp::Ordering::Equal,
    });
    for candidate in results.iter() {
        hit(candidate.leaf, candidate.distance);
    }
    found
}

/// Scratch of a batch of nearest queries: one flat allocation carved into a
/// disjoint view of exactly `k` candidates per query.
///
/// The per-query counts are only known at runtime, so the buffer is sized by
/// an exclusive prefix sum over the batch. This is the only allocation a
/// nearest launch performs.
pub struct ScratchBuffer<S> {
    buffer: Vec<Candidate<S>>,
    offsets: Vec<usize>,
}

impl<S: Zero + Copy> ScratchBuffer<S> {
    /// Allocates scratch for queries with the given candidate counts.
    pub fn provision<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let counts = counts.into_iter();
        let mut offsets = Vec::with_capacity(counts.size_hint().0 + 1);
        let mut total = 0;
        offsets.push(0);
        for count in counts {
            total += count;
            offsets.push(total);
        }

        Self {
            buffer: vec![
                Candidate {
                    leaf: 0,
                    distance: S::ZERO
                };
                total
            ],
            offsets,
        }
    }

    /// Disjoint per-query views, index-aligned with the batch.
    pub fn views(&mut self) -> Vec<&mut [Candidate<S>]> {
        let mut views = Vec::with_capacity(self.offsets.len() - 1);
        let mut rest = self.buffer.as_mut_slice();
        for window in self.offsets.windows(2) {
            let (view, tail) = rest.split_at_mut(window[1] - window[0]);
            views.push(view);
            rest = tail;
        }
        views
    }
}
