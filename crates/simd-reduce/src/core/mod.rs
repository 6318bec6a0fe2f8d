//! The chunked reduction kernel and the algebras it is parameterised by.
//!
//! # Algorithm
//!
//! Every reduction in the crate is one call into the same kernel:
//!
//! ```text
//! ┌──────────────────────── buffer (len elements) ───────────────────────┐
//! │ group 0 │ group 1 │ ... │ group n-1 │ tail (len % LANES)             │
//! └─────────┴─────────┴─────┴───────────┴────────────────────────────────┘
//!   acc = splat(identity)
//!   for g in groups:  acc = lane(acc, g)        // one instruction per op
//!   s = combine(acc[0], ..., acc[LANES-1])      // horizontal reduction
//!   for x in tail:    s = scalar(s, x)
//! ```
//!
//! Buffers shorter than two lane groups, or hosts without a supported vector
//! unit, skip straight to a scalar scan (see [`crate::simd::should_vectorize`]).
//!
//! # Algebras
//!
//! | Reduction | Identity | Lane op | Scalar op |
//! |-----------|----------|---------|-----------|
//! | [`SumOp`] | 0 | add | add |
//! | [`MinOp`] | max value (+∞) | min | min |
//! | [`MaxOp`] | min value (−∞) | max | max |
//! | [`SquaredDeviationOp`] | 0 | (x−μ)² + acc | (x−μ)² + acc |
//! | [`DotOp`] | 0 | x·y + acc | x·y + acc |
//! | [`SquaredDistanceOp`] | 0 | (x−y)² + acc | (x−y)² + acc |
//!
//! # Floating-point caveat
//!
//! The vector path adds in a different order than the scalar loop, so float
//! sums may differ in the last few ULPs. Integer results are exact because
//! integer arithmetic wraps identically on both paths. Min and max are exact
//! for inputs without NaN.

mod kernel;
mod reductions;

pub use kernel::{
    fold_lane_pairs, fold_lanes, fold_scalar, fold_scalar_pairs, reduce, reduce_pair,
};
pub use reductions::{
    DotOp, MaxOp, MinOp, PairReduction, Reduction, SquaredDeviationOp, SquaredDistanceOp, SumOp,
};
