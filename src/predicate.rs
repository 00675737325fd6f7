use crate::math::{Float, SpatialVector};
use crate::volume::Aabb;

/// Tag of predicates evaluated as a yes/no relation against bounding volumes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpatialTag;

/// Tag of predicates requesting the closest leaves to a geometry.
#[derive(Clone, Copy, Debug, Default)]
pub struct NearestTag;

/// Query evaluated against the bounding volumes of a hierarchy.
///
/// The tag discriminates the two query families and selects the traversal
/// kernel at compile time.
pub trait Predicate {
    /// Family of the predicate, [`SpatialTag`] or [`NearestTag`].
    type Tag;
}

/// Predicate satisfied by some set of bounding volumes.
///
/// Subtrees whose volume fails the test are skipped whole, so the predicate
/// must be upward-closed: a volume containing a satisfying volume satisfies
/// it too. Overlap and point-membership relations have this property.
pub trait SpatialPredicate<B>: Predicate<Tag = SpatialTag> {
    /// Returns true if `volume` satisfies the predicate.
    fn test(&self, volume: &B) -> bool;
}

/// Predicate requesting the `k` leaves closest to a geometry.
///
/// The distance must be non-negative and may not grow when a volume is
/// replaced by one containing it; pruning correctness relies on this.
pub trait NearestPredicate<B>: Predicate<Tag = NearestTag> {
    /// Type of the reported distances.
    type Scalar: Float;

    /// Number of requested leaves.
    fn k(&self) -> usize;

    /// Distance from the predicate's geometry to `volume`.
    fn distance(&self, volume: &B) -> Self::Scalar;
}

/// Spatial predicate satisfied by volumes overlapping a geometry.
#[derive(Clone, Copy, Debug)]
pub struct Overlaps<G>(
    /// Geometry a volume must overlap.
    pub G,
);

/// Spatial predicate satisfied by volumes covering a position.
#[derive(Clone, Copy, Debug)]
pub struct Covers<V>(
    /// Position a volume must cover.
    pub V,
);

/// Nearest predicate requesting the `k` leaves closest to a position.
#[derive(Clone, Copy, Debug)]
pub struct Nearest<V> {
    /// Position the distances are measured from.
    pub position: V,
    /// Number of requested leaves.
    pub k: usize,
}

impl<V> Nearest<V> {
    /// Creates a new [`Nearest`] predicate with the given position and count.
    #[inline]
    pub const fn new(position: V, k: usize) -> Self {
        Self { position, k }
    }
}

impl<G> Predicate for Overlaps<G> {
    type Tag = SpatialTag;
}

impl<V: SpatialVector> SpatialPredicate<Aabb<V>> for Overlaps<Aabb<V>> {
    #[inline]
    fn test(&self, volume: &Aabb<V>) -> bool {
        volume.overlaps(self.0)
    }
}

impl<V> Predicate for Covers<V> {
    type Tag = SpatialTag;
}

impl<V: SpatialVector> SpatialPredicate<Aabb<V>> for Covers<V> {
    #[inline]
    fn test(&self, volume: &Aabb<V>) -> bool {
        volume.covers(self.0)
    }
}

impl<V> Predicate for Nearest<V> {
    type Tag = NearestTag;
}

impl<V: SpatialVector> NearestPredicate<Aabb<V>> for Nearest<V> {
    type Scalar = V::Scalar;

    #[inline]
    fn k(&self) -> usize {
        self.k
    }

    #[inline]
    fn distance(&self, volume: &Aabb<V>) -> V::Scalar {
        volume.distance(self.position)
    }
}
