pub(crate) use std::ops::{Add, Div, Mul, Sub};

pub use ultraviolet::{DVec2, DVec3, Vec2, Vec3};

/// Trait for the identity element `zero`.
pub trait Zero {
    /// `zero` value of the type.
    const ZERO: Self;
}

/// Trait for the element `infinity`.
pub trait Infinity {
    /// `infinity` (∞) value of the type.
    fn infinity() -> Self;
}

/// Trait for floating-point numbers.
pub trait Float:
    Zero
    + Infinity
    + Copy
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Returns the square root of a float.
    fn sqrt(self) -> Self;

    /// Returns the minimum between two floats.
    fn min(self, rhs: Self) -> Self;

    /// Returns the maximum between two floats.
    fn max(self, rhs: Self) -> Self;
}

macro_rules! impl_float {
    ($scalar: ty) => {
        impl Zero for $scalar {
            const ZERO: Self = 0.0;
        }

        impl Infinity for $scalar {
            #[inline]
            fn infinity() -> Self {
                <$scalar>::INFINITY
            }
        }

        impl Float for $scalar {
            #[inline]
            fn sqrt(self) -> Self {
                self.sqrt()
            }

            #[inline]
            fn min(self, rhs: Self) -> Self {
                self.min(rhs)
            }

            #[inline]
            fn max(self, rhs: Self) -> Self {
                self.max(rhs)
            }
        }
    };
}

impl_float!(f32);
impl_float!(f64);

/// Trait for vectors usable as the corners of a bounding volume.
pub trait SpatialVector: Copy + Add<Output = Self> + Sub<Output = Self> {
    /// Type of the components of the vector.
    type Scalar: Float;

    /// Number of components of the vector.
    const DIM: usize;

    /// Returns the component of the vector along `axis`.
    fn component(self, axis: usize) -> Self::Scalar;

    /// Returns the component-wise minimum of two vectors.
    fn min_by_component(self, rhs: Self) -> Self;

    /// Returns the component-wise maximum of two vectors.
    fn max_by_component(self, rhs: Self) -> Self;

    /// Returns the vector clamped component-wise between `min` and `max`.
    fn clamped(self, min: Self, max: Self) -> Self;

    /// Returns the component-wise mean of two vectors.
    fn mean(self, rhs: Self) -> Self;

    /// Returns the squared magnitude of the vector.
    fn mag_sq(self) -> Self::Scalar;
}

macro_rules! impl_spatial_vector {
    ($vector: ty, $scalar: ty, [$($f: ident),+]) => {
        impl SpatialVector for $vector {
            type Scalar = $scalar;

            const DIM: usize = [$(stringify!($f)),+].len();

            #[inline]
            fn component(self, axis: usize) -> $scalar {
                [$(self.$f),+][axis]
            }

            #[inline]
            fn min_by_component(self, rhs: Self) -> Self {
                Self::new($(self.$f.min(rhs.$f)),+)
            }

            #[inline]
            fn max_by_component(self, rhs: Self) -> Self {
                Self::new($(self.$f.max(rhs.$f)),+)
            }

            #[inline]
            fn clamped(self, min: Self, max: Self) -> Self {
                Self::new($(self.$f.max(min.$f).min(max.$f)),+)
            }

            #[inline]
            fn mean(self, rhs: Self) -> Self {
                Self::new($((self.$f + rhs.$f) * 0.5),+)
            }

            #[inline]
            fn mag_sq(self) -> $scalar {
                $(self.$f * self.$f +)+ 0.0
            }
        }
    };
}

impl_spatial_vector!(Vec2, f32, [x, y]);
impl_spatial_vector!(Vec3, f32, [x, y, z]);
impl_spatial_vector!(DVec2, f64, [x, y]);
impl_spatial_vector!(DVec3, f64, [x, y, z]);
