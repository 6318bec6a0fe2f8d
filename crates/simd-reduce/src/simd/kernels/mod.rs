//! Lane-group implementations, one per (instruction set, element type).
//!
//! A lane group is a prefix of a caller's buffer reinterpreted as one vector
//! register. Loads are unaligned reads straight out of the borrowed slice;
//! nothing is copied into an intermediate buffer.
//!
//! ISA-backed lane groups can only be created through the `unsafe`
//! constructors [`LaneGroup::load`] and [`LaneGroup::splat`], whose contract
//! requires the running CPU to support the instruction set. Holding a value
//! therefore proves support, which is what makes the arithmetic methods safe.

#[cfg(target_arch = "x86_64")]
pub mod avx2;
#[cfg(target_arch = "aarch64")]
pub mod neon;
mod portable;

#[cfg(target_arch = "x86_64")]
pub use avx2::{Avx2F32, Avx2F64, Avx2I32, Avx2I64};
#[cfg(target_arch = "aarch64")]
pub use neon::{NeonF32, NeonF64, NeonI32, NeonI64};
pub use portable::Portable;

use crate::types::Numeric;

/// Widest lane count of any implementation (AVX-512 `f32`).
pub const MAX_LANES: usize = 16;

/// A fixed-width group of `T` lanes processed by single instructions.
pub trait LaneGroup<T: Numeric>: Copy {
    /// Number of `T` values in one group.
    const LANES: usize;

    /// Reads `LANES` consecutive values starting at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `LANES` values (no alignment
    /// requirement) and the CPU must support this group's instruction set.
    unsafe fn load(ptr: *const T) -> Self;

    /// A group with every lane set to `value`.
    ///
    /// # Safety
    ///
    /// The CPU must support this group's instruction set.
    unsafe fn splat(value: T) -> Self;

    /// Like [`LaneGroup::splat`], using `self` as proof of ISA support.
    fn broadcast(self, value: T) -> Self;

    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
    fn min(self, rhs: Self) -> Self;
    fn max(self, rhs: Self) -> Self;

    /// Writes the lanes into `out[..LANES]`.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than `LANES`.
    fn store(self, out: &mut [T]);
}
