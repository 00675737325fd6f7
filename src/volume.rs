use crate::math::{Float, SpatialVector};

/// Axis-aligned bounding volume described by its minimum and maximum corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb<V> {
    /// Minimum corner of the volume.
    pub min: V,
    /// Maximum corner of the volume.
    pub max: V,
}

impl<V> Aabb<V> {
    /// Creates a new [`Aabb`] with the given min and max corners.
    #[inline]
    pub const fn new(min: V, max: V) -> Self {
        Self { min, max }
    }
}

impl<V: SpatialVector> Aabb<V> {
    /// Creates a degenerate [`Aabb`] containing a single position.
    #[inline]
    pub fn point(position: V) -> Self {
        Self::new(position, position)
    }

    /// Returns the smallest [`Aabb`] containing both `self` and `rhs`.
    #[inline]
    pub fn union(self, rhs: Self) -> Self {
        Self::new(
            self.min.min_by_component(rhs.min),
            self.max.max_by_component(rhs.max),
        )
    }

    /// Returns the center of the volume.
    #[inline]
    pub fn center(self) -> V {
        self.min.mean(self.max)
    }

    /// Returns true if the two volumes share at least one point.
    #[inline]
    pub fn overlaps(self, rhs: Self) -> bool {
        (0..V::DIM).all(|axis| {
            self.min.component(axis) <= rhs.max.component(axis)
                && rhs.min.component(axis) <= self.max.component(axis)
        })
    }

    /// Returns true if `position` lies inside the volume, boundary included.
    #[inline]
    pub fn covers(self, position: V) -> bool {
        (0..V::DIM).all(|axis| {
            self.min.component(axis) <= position.component(axis)
                && position.component(axis) <= self.max.component(axis)
        })
    }

    /// Returns the distance from `position` to the closest point of the
    /// volume, zero when `position` lies inside it.
    ///
    /// The distance to a volume is never greater than the distance to any
    /// volume it contains, which makes it a valid pruning metric.
    #[inline]
    pub fn distance(self, position: V) -> V::Scalar {
        (position.clamped(self.min, self.max) - position).mag_sq().sqrt()
    }
}
