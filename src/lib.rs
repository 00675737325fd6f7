//! # Canopy
//!
//! Canopy runs batches of independent queries against a bounding volume
//! hierarchy and reports every hit to a caller-supplied callback.
//!
//! ## Goals
//!
//! The crate focuses on the per-query traversal kernels and the machinery to
//! launch thousands of them independently. It does not concern itself with
//! geometry beyond axis-aligned boxes, nor with collecting results: hits are
//! streamed to the callback and aggregation stays in the caller's hands.
//!
//! ### Query families
//!
//! There are 2 families of predicates, discriminated by a tag type:
//!
//! - *Spatial* predicates report every leaf whose bounding volume satisfies a
//!   yes/no relation, such as [`Overlaps`] or [`Covers`]. Any number of
//!   leaves can match.
//! - *Nearest* predicates report the `k` leaves closest to a geometry under a
//!   monotone distance metric, in nondecreasing distance order.
//!
//! Canopy uses [rayon](https://github.com/rayon-rs/rayon) for parallelization.
//! Enable the `parallel` feature to access the `Parallel` execution backend;
//! [`Sequential`] is always available.
//!
//! ### Node encodings
//!
//! A hierarchy exposes one of two node encodings, chosen when it is built:
//! [`TwoChildTree`] stores both child links per internal node and is
//! traversed with a small explicit stack, while [`RopeTree`] stores a left
//! child and a rope to the next node of the skipped-subtree depth-first
//! order, and is traversed with a single cursor. The traversal kernels are
//! specialized per encoding at compile time; both encodings produce the same
//! hits for the same logical hierarchy.
//!
//! ## Using Canopy
//!
//! Build a hierarchy from leaf volumes, assemble a batch of predicates and
//! hand both to [`traverse`] together with an execution backend:
//!
//! ```
//! use canopy::prelude::*;
//! use canopy::math::Vec2;
//!
//! let tree = TwoChildTree::from_leaves(&[
//!     Aabb::point(Vec2::new(0.0, 0.0)),
//!     Aabb::point(Vec2::new(1.0, 0.0)),
//!     Aabb::point(Vec2::new(0.0, 1.0)),
//!     Aabb::point(Vec2::new(5.0, 5.0)),
//! ]);
//!
//! let batch = [
//!     Nearest::new(Vec2::new(0.1, 0.1), 2),
//!     Nearest::new(Vec2::new(5.0, 4.0), 1),
//! ];
//!
//! let hits = std::sync::Mutex::new(Vec::new());
//! traverse(&mut Sequential, &tree, &batch, &|_, leaf, distance| {
//!     hits.lock().unwrap().push((leaf, distance));
//! });
//! assert_eq!(hits.into_inner().unwrap().len(), 3);
//! ```
//!
//! Distinct queries may run concurrently, so the callback is shared and must
//! tolerate concurrent invocation; within one nearest query the callbacks
//! arrive in nondecreasing distance order.
//!
//! ## Custom hierarchies and predicates
//!
//! The built-in trees cover the common case, but the kernels only rely on
//! traits: a downstream hierarchy implements [`Hierarchy`] and
//! [`Traversable`], and a downstream predicate implements
//! [`SpatialPredicate`] or [`NearestPredicate`] with the matching tag. The
//! per-query kernels [`Traversable::for_each_overlap`] and
//! [`traversal::nearest::search`] are public for callers that manage their
//! own batching.
//!
//! [`Overlaps`]: predicate::Overlaps
//! [`Covers`]: predicate::Covers
//! [`Sequential`]: execution::Sequential
//! [`TwoChildTree`]: tree::TwoChildTree
//! [`RopeTree`]: tree::RopeTree
//! [`Hierarchy`]: tree::Hierarchy
//! [`Traversable`]: traversal::Traversable
//! [`Traversable::for_each_overlap`]: traversal::Traversable::for_each_overlap
//! [`SpatialPredicate`]: predicate::SpatialPredicate
//! [`NearestPredicate`]: predicate::NearestPredicate

#![warn(missing_docs)]

/// Execution backends scheduling the independent per-query tasks.
pub mod execution;
/// Trait abstractions for scalars and vectors and associated math types.
pub mod math;
/// Predicate traits, tags and built-in predicate types.
pub mod predicate;
/// Traversal kernels, batch dispatch and nearest-query scratch management.
pub mod traversal;
/// Hierarchy contract and the two built-in node encodings.
pub mod tree;
/// Axis-aligned bounding volumes.
pub mod volume;

pub use traversal::traverse;

/// Commonly used types, re-exported.
pub mod prelude {
    #[cfg(feature = "parallel")]
    pub use crate::execution::Parallel;
    pub use crate::{
        execution::{Execution, Sequential},
        predicate::{Covers, Nearest, NearestPredicate, Overlaps, Predicate, SpatialPredicate},
        traversal::{traverse, Traversable},
        tree::{Hierarchy, RopeTree, TwoChildTree},
        volume::Aabb,
    };
}
