//! Vectorized numeric reductions with runtime SIMD dispatch.
//!
//! This crate computes sums, averages, extrema, filters, dot products,
//! distances and a handful of financial statistics over contiguous numeric
//! buffers. Each call probes the CPU once (cached for the process), then runs
//! either an AVX2/NEON lane-group kernel or a plain scalar loop, so results
//! are the same on every host up to floating-point reassociation.
//!
//! # Quick Start
//!
//! ```rust
//! use simd_reduce::{average, max, min, sum};
//!
//! let data = [1.0f64, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(sum(&data), 15.0);
//! assert_eq!(average(&data).unwrap(), 3.0);
//! assert_eq!(min(&data).unwrap(), 1.0);
//! assert_eq!(max(&data).unwrap(), 5.0);
//! ```
//!
//! # Capability Reporting
//!
//! ```rust
//! use simd_reduce::capabilities;
//!
//! let caps = capabilities();
//! println!("{}", caps); // e.g. "simd=avx2 accelerated=true f32x8 f64x4 i32x8 i64x4 +avx2"
//! assert!(caps.lanes_for::<f32>() >= 1);
//! ```
//!
//! # Element Types
//!
//! `f32`, `f64`, `i32` and `i64`. Integer arithmetic wraps on overflow.
//! Integer averages are returned as `f64`.
//!
//! # Features
//!
//! - `parallel`: spread the rows of [`matrix_vector_multiply`] over a rayon
//!   thread pool. Off by default; every other call runs on the caller's thread.
//!
//! # Module Organization
//!
//! - [`api`]: Reductions over one buffer or a pair of buffers
//! - [`stats`]: Portfolio return, volatility, value at risk, matrix-vector product
//! - [`chunking`]: Chunked processing and aliasing-safe writes
//! - [`core`]: The reduction kernel and its algebras
//! - [`simd`]: Capability detection and per-ISA lane groups
//! - [`types`]: Element kinds and runtime-tagged buffers
//! - [`result`]: Results annotated with dispatch and timing metadata

pub mod api;
pub mod chunking;
pub mod core;
pub mod error;
pub mod result;
pub mod simd;
pub mod stats;
pub mod types;

pub use api::{average, dot_product, euclidean_distance, max, min, min_max, sum, where_simd};
pub use chunking::{
    process_in_chunks, process_with_stack_allocation, process_without_aliasing, ranges_overlap,
    ChunkConfig, DEFAULT_CHUNK_SIZE, STACK_THRESHOLD,
};
pub use error::{ReduceError, Result};
pub use result::ReductionResult;
pub use simd::{capabilities, simd_level, warmup, Capabilities, SimdElement, SimdLevel};
pub use stats::{
    annualized_volatility, matrix_vector_multiply, portfolio_return, value_at_risk, variance,
    volatility, z_score, TRADING_DAYS_PER_YEAR,
};
pub use types::{Numeric, NumericSlice, NumericValue, Real, ScalarKind};

/// Commonly used items.
pub mod prelude {
    pub use crate::api::*;
    pub use crate::error::{ReduceError, Result};
    pub use crate::simd::{capabilities, Capabilities, SimdElement};
    pub use crate::stats::*;
    pub use crate::types::{Numeric, Real, ScalarKind};
}
