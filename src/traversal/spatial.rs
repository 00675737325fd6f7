use crate::math::SpatialVector;
use crate::predicate::SpatialPredicate;
use crate::traversal::{Traversable, STACK_DEPTH};
use crate::tree::{Hierarchy, NodeId, RopeTree, TwoChildTree, SENTINEL};

impl<V: SpatialVector> Traversable for TwoChildTree<V> {
    #[inline]
    fn right_child(&self, node: NodeId) -> NodeId {
        self.children[node as usize].1
    }

    fn for_each_overlap<P, F>(&self, predicate: &P, mut hit: F)
    where
        P: SpatialPredicate<Self::Volume>,
        F: FnMut(u32),
    {
        let mut stack = [SENTINEL; STACK_DEPTH];
        let mut top = 1;
        let mut node = self.root();

        loop {
            let left = self.left_child(node);
            let right = self.right_child(node);

            let overlap_left = predicate.test(&self.bounds(left));
            let overlap_right = predicate.test(&self.bounds(right));

            if overlap_left && self.is_leaf(left) {
                hit(self.leaf_index(left));
            }
            if overlap_right && self.is_leaf(right) {
                hit(self.leaf_index(right));
            }

            let descend_left = overlap_left && !self.is_leaf(left);
            let descend_right = overlap_right && !self.is_leaf(right);

            if !descend_left && !descend_right {
                top -= 1;
                node = stack[top];
                if node == SENTINEL {
                    break;
                }
            } else {
                node = if descend_left { left } else { right };
                if descend_left && descend_right {
                    debug_assert!(top < STACK_DEPTH);
                    stack[top] = right;
                    top += 1;
                }
            }
        }
    }
}

impl<V: SpatialVector> Traversable for RopeTree<V> {
    #[inline]
    fn right_child(&self, node: NodeId) -> NodeId {
        self.ropes[self.left[node as usize] as usize]
    }

    fn for_each_overlap<P, F>(&self, predicate: &P, mut hit: F)
    where
        P: SpatialPredicate<Self::Volume>,
        F: FnMut(u32),
    {
        let mut next = self.root();
        while next != SENTINEL {
            if predicate.test(&self.bounds(next)) {
                if !self.is_leaf(next) {
                    next = self.left_child(next);
                } else {
                    hit(self.leaf_index(next));
                    next = self.rope(next);
                }
            } else {
                // The rope skips exactly the rejected subtree.
                next = self.rope(next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{scatter, spatial_reference};
    use crate::math::Vec2;
    use crate::predicate::{Covers, Overlaps};
    use crate::traversal::Traversable;
    use crate::tree::{RopeTree, TwoChildTree};
    use crate::volume::Aabb;
    use rand::prelude::*;

    fn collect<T: Traversable>(
        tree: &T,
        predicate: &impl crate::predicate::SpatialPredicate<T::Volume>,
    ) -> Vec<u32> {
        let mut hits = Vec::new();
        tree.for_each_overlap(predicate, |leaf| hits.push(leaf));
        hits.sort_unstable();
        hits
    }

    fn sample_layout() -> Vec<Aabb<Vec2>> {
        [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (5.0, 5.0)]
            .map(|(x, y)| Aabb::point(Vec2::new(x, y)))
            .to_vec()
    }

    #[test]
    fn overlapping_box_hits_its_corner() {
        let region = Overlaps(Aabb::new(Vec2::new(-0.5, -0.5), Vec2::new(1.5, 1.5)));
        let two_child = TwoChildTree::from_leaves(&sample_layout());
        let rope = RopeTree::from_leaves(&sample_layout());
        assert_eq!(collect(&two_child, &region), vec![0, 1, 2]);
        assert_eq!(collect(&rope, &region), vec![0, 1, 2]);
    }

    #[test]
    fn disjoint_box_hits_nothing() {
        let region = Overlaps(Aabb::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0)));
        let two_child = TwoChildTree::from_leaves(&sample_layout());
        let rope = RopeTree::from_leaves(&sample_layout());
        assert!(collect(&two_child, &region).is_empty());
        assert!(collect(&rope, &region).is_empty());
    }

    #[test]
    fn unbounded_box_hits_everything() {
        let all = Overlaps(Aabb::new(
            Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
            Vec2::new(f32::INFINITY, f32::INFINITY),
        ));
        let two_child = TwoChildTree::from_leaves(&sample_layout());
        let rope = RopeTree::from_leaves(&sample_layout());
        assert_eq!(collect(&two_child, &all), vec![0, 1, 2, 3]);
        assert_eq!(collect(&rope, &all), vec![0, 1, 2, 3]);
    }

    #[test]
    fn covers_hits_exactly_the_covering_leaves() {
        let leaves = [
            Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0)),
            Aabb::new(Vec2::new(1.0, 1.0), Vec2::new(3.0, 3.0)),
            Aabb::new(Vec2::new(4.0, 4.0), Vec2::new(5.0, 5.0)),
        ];
        let tree = TwoChildTree::from_leaves(&leaves);
        assert_eq!(collect(&tree, &Covers(Vec2::new(1.5, 1.5))), vec![0, 1]);
        assert_eq!(collect(&tree, &Covers(Vec2::new(4.5, 4.5))), vec![2]);
    }

    #[test]
    fn encodings_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(1808);
        for count in [2, 3, 7, 64, 501, 2048] {
            let leaves = scatter(&mut rng, count);
            let two_child = TwoChildTree::from_leaves(&leaves);
            let rope = RopeTree::from_leaves(&leaves);

            for _ in 0..16 {
                let min = Vec2::new(rng.gen_range(-6.0..4.0), rng.gen_range(-6.0..4.0));
                let size = Vec2::new(rng.gen_range(0.0..4.0), rng.gen_range(0.0..4.0));
                let region = Overlaps(Aabb::new(min, min + size));

                let expected = spatial_reference(&leaves, &region);
                assert_eq!(collect(&two_child, &region), expected);
                assert_eq!(collect(&rope, &region), expected);
            }
        }
    }
}
