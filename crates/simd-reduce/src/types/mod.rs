//! Element type definitions.
//!
//! The engine reduces over a closed set of four element kinds:
//!
//! | Kind | Rust type | Bytes | `Mean` | Overflow |
//! |------|-----------|-------|--------|----------|
//! | [`ScalarKind::F32`] | `f32` | 4 | `f32` | IEEE |
//! | [`ScalarKind::F64`] | `f64` | 8 | `f64` | IEEE |
//! | [`ScalarKind::I32`] | `i32` | 4 | `f64` | wraps |
//! | [`ScalarKind::I64`] | `i64` | 8 | `f64` | wraps |
//!
//! # Core Traits
//!
//! - [`Numeric`]: arithmetic and reduction identities shared by all kinds
//! - [`Real`]: floating-point extras (`sqrt`, conversions) for the statistics
//!
//! # Dynamic Dispatch
//!
//! [`NumericSlice`] and [`NumericValue`] carry the kind as an enum tag for
//! callers that cannot name the element type statically:
//!
//! ```rust
//! use simd_reduce::types::{NumericSlice, NumericValue, ScalarKind};
//!
//! let kind: ScalarKind = "int".parse().unwrap();
//! assert_eq!(kind, ScalarKind::I32);
//!
//! let data = [4i32, 8, 15, 16, 23, 42];
//! let total = NumericSlice::from(&data[..]).sum();
//! assert_eq!(total, NumericValue::I32(108));
//! ```

mod dynamic;
mod scalar;

pub use dynamic::{NumericSlice, NumericValue};
pub use scalar::{Numeric, Real, ScalarKind};
