//! Hardware capability probing and vector kernel dispatch.
//!
//! # Supported Architectures
//!
//! | Architecture | Instruction Set | Register Width | Lanes (f32 / f64 / i32 / i64) |
//! |--------------|-----------------|----------------|-------------------------------|
//! | x86_64 | AVX2 | 256-bit | 8 / 4 / 8 / 4 |
//! | aarch64 | NEON | 128-bit | 4 / 2 / 4 / 2 |
//! | Any | Scalar | n/a | 1 / 1 / 1 / 1 |
//!
//! AVX-512, FMA and SSE flags are detected and reported but not dispatched to.
//!
//! # Runtime Dispatch
//!
//! 1. [`capabilities()`] probes the CPU once and caches a [`Capabilities`]
//!    snapshot for the life of the process.
//! 2. [`should_vectorize`] decides, from buffer length and lane count alone,
//!    whether the vector path pays off.
//! 3. [`SimdElement`] maps each element type to its lane group for the
//!    detected instruction set; the kernel is then run inside a
//!    `#[target_feature]` function so the lane operations compile to the
//!    native instructions.
//!
//! Setting `SIMD_REDUCE_FORCE_SCALAR=1` before the first reduction disables the
//! vector path for the process.
//!
//! # Module Contents
//!
//! - [`detect`](detect): CPU feature detection ([`SimdLevel`], [`Capabilities`])
//! - [`dispatch`](dispatch): Dispatch policy and ISA routing ([`SimdElement`])
//! - [`kernels`](kernels): Lane groups per instruction set ([`LaneGroup`])

pub mod detect;
pub mod dispatch;
pub mod kernels;

pub use detect::{capabilities, simd_level, warmup, Capabilities, SimdLevel, FORCE_SCALAR_ENV};
pub use dispatch::{should_vectorize, SimdElement};
pub use kernels::{LaneGroup, Portable, MAX_LANES};
